// File dataset repository - reads records_mapped.json from disk
use crate::application::dataset_repository::{DatasetRepository, LoadError};
use crate::domain::record::RecordSet;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileDatasetRepository {
    path: PathBuf,
}

impl FileDatasetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetRepository for FileDatasetRepository {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn load_records(&self) -> Result<RecordSet, LoadError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::dataset_builder::DatasetBuilder;

    #[tokio::test]
    async fn test_reads_builder_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records_mapped.json");

        let mut builder = DatasetBuilder::new();
        builder.add_report(
            "https://example.org/r?id=1&t=1758251593",
            vec![("Weight".to_string(), Some(70.0))],
        );
        builder.write_to(&path).unwrap();

        let records = FileDatasetRepository::new(&path).load_records().await.unwrap();
        assert_eq!(records.records[0].date, "2025-09-19");
        assert_eq!(records.records[0].observations[0].labels[0].1, Some(70.0));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDatasetRepository::new(dir.path().join("absent.json"))
            .load_records()
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Io { .. }));
    }
}
