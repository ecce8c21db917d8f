//! Client for the audio merge service.
//!
//! The merge service reads the user's recordings from the bucket itself and
//! answers `POST /webhook` with the concatenated MP3 as the raw response body.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

const MERGE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("merge request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("merge service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("merge service returned an empty body")]
    Empty,
}

#[async_trait]
pub trait AudioMerger: Send + Sync {
    /// Concatenate `recordings` for `user_id`. Returns the merged audio bytes.
    async fn merge(&self, user_id: &str, recordings: &[String]) -> Result<Bytes, MergeError>;
}

pub struct MergeServiceClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MergeServiceClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, MergeError> {
        let client = Client::builder()
            .timeout(MERGE_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn webhook_url(&self) -> String {
        format!("{}/webhook", self.base_url)
    }
}

#[async_trait]
impl AudioMerger for MergeServiceClient {
    async fn merge(&self, user_id: &str, recordings: &[String]) -> Result<Bytes, MergeError> {
        tracing::info!("Requesting merge of {} recordings", recordings.len());

        let res = self
            .client
            .post(self.webhook_url())
            .header("API_KEY", &self.api_key)
            .header("X-API-Key", &self.api_key)
            .json(&serde_json::json!({
                "userId": user_id,
                "recordings": recordings,
            }))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!("Merge service returned {}: {}", status, body);
            return Err(MergeError::Status { status, body });
        }

        let audio = res.bytes().await?;
        if audio.is_empty() {
            return Err(MergeError::Empty);
        }

        tracing::info!("Merge service returned {} bytes", audio.len());
        Ok(audio)
    }
}
