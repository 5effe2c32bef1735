// HTTP dataset repository - one GET for the pre-built records file
use crate::application::dataset_repository::{DatasetRepository, LoadError};
use crate::domain::record::RecordSet;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpDatasetRepository {
    client: reqwest::Client,
    url: String,
}

impl HttpDatasetRepository {
    pub fn new(url: String) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    async fn fetch_body(&self) -> Result<String, LoadError> {
        let http_error = |source| LoadError::Http {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(http_error)
    }
}

#[async_trait]
impl DatasetRepository for HttpDatasetRepository {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn load_records(&self) -> Result<RecordSet, LoadError> {
        let body = self.fetch_body().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), self.url);

        Ok(serde_json::from_str(&body)?)
    }
}
