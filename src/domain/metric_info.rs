// Metric help text - static descriptions shown next to a metric
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const FALLBACK_DESCRIPTION: &str =
    "No description is available for this metric yet.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDescription {
    pub description: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub ranges: Option<String>,
    #[serde(default)]
    pub trend: Option<String>,
}

/// Lookup table from metric name to its help text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricDescriptions {
    entries: HashMap<String, MetricDescription>,
}

impl MetricDescription {
    pub fn new(description: &str, unit: Option<&str>, ranges: Option<&str>, trend: Option<&str>) -> Self {
        Self {
            description: description.to_string(),
            unit: unit.map(str::to_string),
            ranges: ranges.map(str::to_string),
            trend: trend.map(str::to_string),
        }
    }
}

impl MetricDescriptions {
    pub fn new(entries: HashMap<String, MetricDescription>) -> Self {
        Self { entries }
    }

    pub fn get(&self, metric: &str) -> Option<&MetricDescription> {
        self.entries.get(metric)
    }

    /// Description text, or the generic fallback for unknown metrics.
    pub fn description_or_fallback(&self, metric: &str) -> &str {
        self.get(metric)
            .map(|d| d.description.as_str())
            .unwrap_or(FALLBACK_DESCRIPTION)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn default_descriptions() -> MetricDescriptions {
    let entries = [
        (
            "Weight",
            MetricDescription::new(
                "Total body mass measured by the scale.",
                Some("kg"),
                None,
                Some("Look at the weekly direction rather than day-to-day noise."),
            ),
        ),
        (
            "BMI",
            MetricDescription::new(
                "Body mass index: weight divided by height squared.",
                Some("kg/m2"),
                Some("18.5-24.9 normal"),
                None,
            ),
        ),
        (
            "Body Fat",
            MetricDescription::new(
                "Share of body mass that is fat tissue.",
                Some("%"),
                Some("Men 10-20, women 18-28"),
                Some("Lower is usually better within the healthy range."),
            ),
        ),
        (
            "Visceral Fat",
            MetricDescription::new(
                "Index of fat stored around the internal organs.",
                None,
                Some("1-9 healthy"),
                Some("Lower is better."),
            ),
        ),
        (
            "Muscle Mass",
            MetricDescription::new(
                "Estimated mass of skeletal and smooth muscle.",
                Some("kg"),
                None,
                Some("Higher is usually better."),
            ),
        ),
        (
            "BMR",
            MetricDescription::new(
                "Basal metabolic rate: energy used at complete rest.",
                Some("kcal"),
                None,
                None,
            ),
        ),
    ];

    MetricDescriptions::new(
        entries
            .into_iter()
            .map(|(name, description)| (name.to_string(), description))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let descriptions = default_descriptions();

        let weight = descriptions.get("Weight").unwrap();
        assert_eq!(weight.unit.as_deref(), Some("kg"));
        assert!(descriptions.get("Grip Strength").is_none());
        assert_eq!(
            descriptions.description_or_fallback("Grip Strength"),
            FALLBACK_DESCRIPTION
        );
    }

    #[test]
    fn test_deserialize_partial_entry() {
        let entry: MetricDescription =
            serde_json::from_str(r#"{"description": "Water share", "unit": "%"}"#).unwrap();
        assert_eq!(entry.unit.as_deref(), Some("%"));
        assert_eq!(entry.ranges, None);
    }
}
