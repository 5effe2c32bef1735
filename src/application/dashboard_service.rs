// Dashboard service - Use case for loading the dataset into a chartable dashboard
use crate::application::dataset_repository::{DatasetRepository, LoadError};
use crate::domain::catalog::MetricCatalog;
use crate::domain::dashboard::Dashboard;
use crate::domain::record::flatten;
use crate::infrastructure::config::MetricsConfig;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to load dataset: {0}")]
    LoadFailure(#[from] LoadError),

    #[error("dataset has no chartable metrics")]
    EmptyDataset,
}

impl DashboardError {
    /// The single line shown to the user in place of the chart.
    pub fn status_message(&self) -> String {
        match self {
            DashboardError::LoadFailure(e) => format!("Could not load measurement data ({e})."),
            DashboardError::EmptyDataset => "No measurements to display yet.".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DatasetRepository>,
    metrics_config: MetricsConfig,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DatasetRepository>, metrics_config: MetricsConfig) -> Self {
        Self {
            repository,
            metrics_config,
        }
    }

    pub fn metrics_config(&self) -> &MetricsConfig {
        &self.metrics_config
    }

    pub async fn load_dashboard(&self) -> Result<Dashboard, DashboardError> {
        let location = self.repository.location();
        tracing::info!("Loading dataset from {}", location);

        let records = self.repository.load_records().await.map_err(|e| {
            tracing::error!("Failed to load dataset from {}: {}", location, e);
            e
        })?;

        let rows = flatten(&records);
        tracing::debug!(
            "Flattened {} dates, {} observations into {} rows",
            records.records.len(),
            records.observation_count(),
            rows.len()
        );

        let catalog = MetricCatalog::build(
            &rows,
            &self.metrics_config.excluded,
            &self.metrics_config.groups,
        );
        if catalog.is_empty() {
            tracing::warn!("No chartable metrics in dataset from {}", location);
            return Err(DashboardError::EmptyDataset);
        }

        tracing::info!(
            "Dataset ready: {} rows, {} metrics in {} groups, {} ungrouped",
            rows.len(),
            catalog.len(),
            catalog.groups.len(),
            catalog.ungrouped.len()
        );

        Ok(Dashboard::new(rows, catalog))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::record::RecordSet;
    use async_trait::async_trait;

    /// Repository serving a fixed JSON document.
    pub(crate) struct StaticRepository(pub &'static str);

    #[async_trait]
    impl DatasetRepository for StaticRepository {
        fn location(&self) -> String {
            "memory".to_string()
        }

        async fn load_records(&self) -> Result<RecordSet, LoadError> {
            Ok(serde_json::from_str(self.0)?)
        }
    }

    pub(crate) fn service(json: &'static str) -> DashboardService {
        DashboardService::new(Arc::new(StaticRepository(json)), MetricsConfig::default())
    }

    #[tokio::test]
    async fn test_load_dashboard() {
        let dashboard = service(
            r#"{"records": {"2024-01-01": [{"url": "u1", "labels": {"Weight": 70, "Height": 170, "Grip": 40}}]}}"#,
        )
        .load_dashboard()
        .await
        .unwrap();

        assert_eq!(dashboard.rows().len(), 3);
        assert_eq!(dashboard.catalog().metrics().collect::<Vec<_>>(), vec!["Weight", "Grip"]);
        assert_eq!(dashboard.catalog().ungrouped, vec!["Grip"]);
    }

    #[tokio::test]
    async fn test_only_excluded_metrics_is_empty_dataset() {
        let err = service(r#"{"records": {"2024-01-01": [{"url": "u", "labels": {"AGE": 40}}]}}"#)
            .load_dashboard()
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::EmptyDataset));
        assert_eq!(err.status_message(), "No measurements to display yet.");
    }

    #[tokio::test]
    async fn test_malformed_json_is_load_failure() {
        let err = service(r#"{"records": "#).load_dashboard().await.unwrap_err();

        assert!(matches!(err, DashboardError::LoadFailure(LoadError::Parse(_))));
        assert!(err.status_message().starts_with("Could not load measurement data"));
    }
}
