//! HTTP client for the NFT record API.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use nftdb_shared::{format_id_list, routes, NftData};

/// Default record API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/records";

/// Errors returned by [`NftClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("Response Code({status}): {body}")]
    Status { status: u16, body: String },
}

/// Client for the record API, rooted at the records mount point.
#[derive(Clone)]
pub struct NftClient {
    client: Client,
    base_url: String,
}

impl NftClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, 30)
    }

    /// Create client with custom timeout (for testing).
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one record. A 404 is reported as `None`.
    pub async fn get(&self, id: i32) -> Result<Option<NftData>, ClientError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(id, "NFT not found");
            return Ok(None);
        }

        let nft = check(response).await?.json().await?;
        Ok(Some(nft))
    }

    /// Fetch the records with the given ids, or every record when `ids` is `None`.
    pub async fn get_many(&self, ids: Option<&[i32]>) -> Result<Vec<NftData>, ClientError> {
        let url = match ids {
            None => self.base_url.clone(),
            Some(ids) => format!(
                "{}{}?ids={}",
                self.base_url,
                routes::BATCH,
                format_id_list(ids)
            ),
        };

        let response = self.client.get(url).send().await?;
        let nfts: Vec<NftData> = check(response).await?.json().await?;
        tracing::debug!(count = nfts.len(), "NFT data fetched");
        Ok(nfts)
    }

    /// Create new records. Returns the server's status message.
    pub async fn create(&self, nfts: &[NftData]) -> Result<String, ClientError> {
        let response = self.client.post(&self.base_url).json(nfts).send().await?;
        Ok(check(response).await?.text().await?)
    }

    /// Update existing records, creating the ones the server does not know.
    pub async fn update(&self, nfts: &[NftData]) -> Result<String, ClientError> {
        let response = self.client.put(&self.base_url).json(nfts).send().await?;
        Ok(check(response).await?.text().await?)
    }

    /// Reset the stats of the records with the given ids.
    pub async fn reset(&self, ids: &[i32]) -> Result<String, ClientError> {
        let response = self
            .client
            .put(format!("{}{}", self.base_url, routes::RESET))
            .json(ids)
            .send()
            .await?;
        Ok(check(response).await?.text().await?)
    }
}

impl Default for NftClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), body = %body, "Record API request failed");
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}
