// Dataset builder - assembles records_mapped.json from scraped report values
use crate::domain::record::{Observation, RecordSet};
use crate::infrastructure::report_reader::{ReportReader, ReportReading};
use crate::infrastructure::report_urls::date_from_url;
use anyhow::Context;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    records: RecordSet,
    units: Vec<(String, String)>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a report's values under the date derived from its URL.
    /// Returns that date.
    pub fn add_report(&mut self, url: &str, labels: Vec<(String, Option<f64>)>) -> String {
        let date = date_from_url(url);
        self.records
            .observations_mut(&date)
            .push(Observation::new(url.to_string(), labels));
        date
    }

    /// File parsed report readings, noting each metric's first seen unit.
    pub fn add_readings(&mut self, url: &str, readings: Vec<ReportReading>) -> String {
        let mut labels = Vec::with_capacity(readings.len());
        for reading in readings {
            if let Some(unit) = reading.unit {
                if !self.units.iter().any(|(metric, _)| *metric == reading.label) {
                    self.units.push((reading.label.clone(), unit));
                }
            }
            labels.push((reading.label, Some(reading.value)));
        }
        self.add_report(url, labels)
    }

    /// Read every report in `urls`. Reports that cannot be fetched are
    /// skipped with a warning.
    pub async fn collect(reader: &ReportReader, urls: &[String]) -> Self {
        let mut builder = Self::new();
        for url in urls {
            match reader.read(url).await {
                Ok(readings) => {
                    let date = builder.add_readings(url, readings);
                    tracing::info!("Read report {} dated {}", url, date);
                }
                Err(e) => tracing::warn!("Skipping report: {}", e),
            }
        }
        builder
    }

    /// Units seen per metric, in first-seen order.
    pub fn units(&self) -> &[(String, String)] {
        &self.units
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn build(self) -> RecordSet {
        self.records
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json().context("Failed to serialize records")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write records to {}", path.display()))?;
        tracing::info!(
            "Saved {} reports over {} dates to {}",
            self.records.observation_count(),
            self.records.records.len(),
            path.display()
        );
        Ok(())
    }
}
