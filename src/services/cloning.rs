//! ElevenLabs instant voice cloning.
//!
//! Uploads a single merged MP3 to `/voices/add` and returns the new voice ID.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const CLONE_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    #[error("clone request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("cloning API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("cloning API response did not contain a voice_id")]
    MissingVoiceId,
}

/// Everything the cloning API needs for one voice.
#[derive(Debug, Clone)]
pub struct VoiceCloneRequest {
    pub user_id: String,
    pub audio: Bytes,
    pub name: String,
    pub description: String,
}

impl VoiceCloneRequest {
    pub fn file_name(&self) -> String {
        format!("{}_combined.mp3", self.user_id)
    }
}

#[async_trait]
pub trait VoiceCloner: Send + Sync {
    /// Create a cloned voice. Returns the provider's voice identifier.
    async fn clone_voice(&self, request: VoiceCloneRequest) -> Result<String, CloneError>;
}

#[derive(Deserialize)]
struct AddVoiceResponse {
    voice_id: Option<String>,
}

pub struct ElevenLabsClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl ElevenLabsClient {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self, CloneError> {
        let client = Client::builder()
            .timeout(CLONE_TIMEOUT)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl VoiceCloner for ElevenLabsClient {
    async fn clone_voice(&self, request: VoiceCloneRequest) -> Result<String, CloneError> {
        tracing::info!("Cloning voice on ElevenLabs: {}", request.name);

        let file_name = request.file_name();
        let part = Part::stream(request.audio)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;
        let form = Form::new()
            .text("name", request.name)
            .text("description", request.description)
            .part("files", part);

        let res = self
            .client
            .post(format!("{}/voices/add", self.api_url))
            .header("xi-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!("ElevenLabs returned {}: {}", status, body);
            return Err(CloneError::Status { status, body });
        }

        let body: AddVoiceResponse = res.json().await?;
        let voice_id = body
            .voice_id
            .filter(|id| !id.is_empty())
            .ok_or(CloneError::MissingVoiceId)?;

        tracing::info!("Voice cloned, voice_id={}", voice_id);
        Ok(voice_id)
    }
}
