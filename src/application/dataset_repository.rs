// Repository trait for loading the measurement dataset
use crate::domain::record::RecordSet;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Where the dataset is read from, for logs and status text.
    fn location(&self) -> String;

    /// Read and parse the whole record set once.
    async fn load_records(&self) -> Result<RecordSet, LoadError>;
}
