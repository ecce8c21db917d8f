//! Object store access for recordings, voice records and user credentials.
//!
//! Talks to any S3-compatible endpoint. By default that is the Google Cloud
//! Storage interoperability endpoint, authenticated with HMAC keys.

use anyhow::Context;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::models::{RecordingObject, UserProfile, VoiceRecord};

pub fn recordings_prefix(user_id: &str) -> String {
    format!("{}/recordings/", user_id)
}

pub fn voice_record_key(user_id: &str) -> String {
    format!("{}/voice_id/voice_id.json", user_id)
}

pub fn credentials_key(user_id: &str) -> String {
    format!("{}/credentials/login_credentials.json", user_id)
}

/// Per-user storage operations used by the clone workflow.
#[async_trait]
pub trait VoiceStore: Send + Sync {
    /// Every object under the user's recordings prefix, audio or not.
    async fn list_recordings(&self, user_id: &str) -> anyhow::Result<Vec<RecordingObject>>;

    async fn get_voice_record(&self, user_id: &str) -> anyhow::Result<Option<VoiceRecord>>;

    async fn put_voice_record(&self, record: &VoiceRecord) -> anyhow::Result<()>;

    async fn get_user_profile(&self, user_id: &str) -> anyhow::Result<Option<UserProfile>>;
}

/// Create an S3 client for the configured endpoint.
/// Static HMAC keys win; without them the default AWS credential chain is used.
pub async fn create_s3_client(config: &Config) -> S3Client {
    if config.has_static_storage_credentials() {
        let credentials = Credentials::new(
            &config.storage_access_key_id,
            &config.storage_secret_access_key,
            None,
            None,
            "static",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version_latest()
            .region(Region::new(config.storage_region.clone()))
            .endpoint_url(&config.storage_endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        return S3Client::from_conf(s3_config);
    }

    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.storage_region.clone()))
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&shared)
        .endpoint_url(&config.storage_endpoint)
        .force_path_style(true)
        .build();

    S3Client::from_conf(s3_config)
}

pub struct S3VoiceStore {
    client: S3Client,
    bucket: String,
}

impl S3VoiceStore {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Read an object as UTF-8 text. A missing key is `Ok(None)`.
    async fn get_text(&self, key: &str) -> anyhow::Result<Option<String>> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_no_such_key()) {
                    return Ok(None);
                }
                return Err(anyhow::Error::new(err).context(format!("get {}", key)));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .with_context(|| format!("read body of {}", key))?
            .into_bytes();

        let text = String::from_utf8(bytes.to_vec()).with_context(|| format!("{} is not UTF-8", key))?;
        Ok(Some(text))
    }

    async fn put_json(&self, key: &str, body: String) -> anyhow::Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body.into_bytes()))
            .content_type("application/json")
            .send()
            .await
            .with_context(|| format!("put {}", key))?;
        Ok(())
    }
}

#[async_trait]
impl VoiceStore for S3VoiceStore {
    async fn list_recordings(&self, user_id: &str) -> anyhow::Result<Vec<RecordingObject>> {
        let prefix = recordings_prefix(user_id);
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&prefix)
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.with_context(|| format!("list {}", prefix))?;
            for object in page.contents() {
                if let Some(key) = object.key() {
                    objects.push(RecordingObject {
                        key: key.to_string(),
                        size: object.size().and_then(|s| u64::try_from(s).ok()),
                    });
                }
            }
        }

        Ok(objects)
    }

    async fn get_voice_record(&self, user_id: &str) -> anyhow::Result<Option<VoiceRecord>> {
        let key = voice_record_key(user_id);
        let Some(text) = self.get_text(&key).await? else {
            return Ok(None);
        };
        let record = serde_json::from_str(&text).with_context(|| format!("parse {}", key))?;
        Ok(Some(record))
    }

    async fn put_voice_record(&self, record: &VoiceRecord) -> anyhow::Result<()> {
        let key = voice_record_key(&record.user_id);
        let body = serde_json::to_string_pretty(record)?;
        self.put_json(&key, body).await?;
        tracing::info!("Voice record saved to {}/{}", self.bucket, key);
        Ok(())
    }

    async fn get_user_profile(&self, user_id: &str) -> anyhow::Result<Option<UserProfile>> {
        let key = credentials_key(user_id);
        let Some(text) = self.get_text(&key).await? else {
            return Ok(None);
        };
        let profile = serde_json::from_str(&text).with_context(|| format!("parse {}", key))?;
        Ok(Some(profile))
    }
}
