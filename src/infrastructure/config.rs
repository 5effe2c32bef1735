use crate::domain::catalog::{default_excluded, default_groups, MetricGroup};
use crate::domain::metric_info::{default_descriptions, MetricDescription, MetricDescriptions};
use crate::domain::selection::SelectionMode;
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_DATASET_PATH: &str = "records_mapped.json";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetSettings {
    /// Site origin the dataset is served from. Without one the path is
    /// read from the local filesystem.
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default = "default_dataset_path")]
    pub path: String,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionSettings {
    #[serde(default)]
    pub mode: SelectionMode,
    /// Metrics to select right after loading, in click order.
    #[serde(default)]
    pub select: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_excluded")]
    pub excluded: Vec<String>,
    #[serde(default = "default_groups")]
    pub groups: Vec<MetricGroup>,
    #[serde(default)]
    pub descriptions: Option<Vec<DescriptionEntry>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DescriptionEntry {
    pub metric: String,
    pub description: String,
    pub unit: Option<String>,
    pub ranges: Option<String>,
    pub trend: Option<String>,
}

/// Where to read the dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Http(String),
    File(String),
}

fn default_dataset_path() -> String {
    DEFAULT_DATASET_PATH.to_string()
}

fn default_placeholder() -> String {
    crate::domain::table::VALUE_PLACEHOLDER.to_string()
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            origin: None,
            path: default_dataset_path(),
            placeholder: default_placeholder(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            excluded: default_excluded(),
            groups: default_groups(),
            descriptions: None,
        }
    }
}

impl DatasetSettings {
    pub fn source(&self) -> DatasetSource {
        if self.path.starts_with("http://") || self.path.starts_with("https://") {
            return DatasetSource::Http(self.path.clone());
        }
        match &self.origin {
            Some(origin) => DatasetSource::Http(join_url(origin, &self.path)),
            None => DatasetSource::File(self.path.clone()),
        }
    }
}

impl MetricsConfig {
    /// Configured help texts, or the built-in table when none are configured.
    pub fn metric_descriptions(&self) -> MetricDescriptions {
        match &self.descriptions {
            Some(entries) => MetricDescriptions::new(
                entries
                    .iter()
                    .map(|e| {
                        let description = MetricDescription {
                            description: e.description.clone(),
                            unit: e.unit.clone(),
                            ranges: e.ranges.clone(),
                            trend: e.trend.clone(),
                        };
                        (e.metric.clone(), description)
                    })
                    .collect::<HashMap<_, _>>(),
            ),
            None => default_descriptions(),
        }
    }
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_metrics_config() -> anyhow::Result<MetricsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/metrics").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Join a site origin and a dataset path with exactly one slash.
pub fn join_url(origin: &str, path: &str) -> String {
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse<T: for<'de> Deserialize<'de>>(toml: &str) -> T {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://example.org/", "/records_mapped.json"),
            "https://example.org/records_mapped.json"
        );
        assert_eq!(join_url("http://localhost:8000", "data/r.json"), "http://localhost:8000/data/r.json");
    }

    #[test]
    fn test_dataset_source() {
        let mut settings = DatasetSettings::default();
        assert_eq!(settings.source(), DatasetSource::File("records_mapped.json".to_string()));

        settings.origin = Some("http://localhost:8000".to_string());
        assert_eq!(
            settings.source(),
            DatasetSource::Http("http://localhost:8000/records_mapped.json".to_string())
        );

        settings.path = "https://cdn.example.org/r.json".to_string();
        assert_eq!(settings.source(), DatasetSource::Http("https://cdn.example.org/r.json".to_string()));
    }

    #[test]
    fn test_dashboard_config_from_toml() {
        let config: DashboardConfig = parse(
            r#"
            [dataset]
            origin = "http://localhost:8000"

            [session]
            mode = "dual"
            select = ["Weight", "BMI"]
            "#,
        );

        assert_eq!(config.dataset.path, DEFAULT_DATASET_PATH);
        assert_eq!(config.dataset.placeholder, "-");
        assert_eq!(config.session.mode, SelectionMode::Dual);
        assert_eq!(config.session.select, vec!["Weight", "BMI"]);
    }

    #[test]
    fn test_metrics_config_defaults_and_overrides() {
        let config: MetricsConfig = parse(
            r#"
            excluded = ["height"]

            [[groups]]
            name = "Core"
            icon = "star"
            members = ["Weight"]

            [[descriptions]]
            metric = "Weight"
            description = "Scale reading"
            unit = "kg"
            "#,
        );

        assert_eq!(config.excluded, vec!["height"]);
        assert_eq!(config.groups, vec![MetricGroup::new("Core", "star", &["Weight"])]);
        let descriptions = config.metric_descriptions();
        assert_eq!(descriptions.len(), 1);
        assert_eq!(descriptions.get("Weight").unwrap().description, "Scale reading");

        let defaults: MetricsConfig = parse("");
        assert_eq!(defaults.excluded, default_excluded());
        assert_eq!(defaults.groups, default_groups());
        assert!(!defaults.metric_descriptions().is_empty());
    }
}
