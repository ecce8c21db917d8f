use serde::{Deserialize, Serialize};

/// Version stamped on every voice record this service writes.
pub const VOICE_RECORD_VERSION: u32 = 1;

/// Body of `POST /clone-voice`.
///
/// Only `userId` is acted on; the rest is webhook metadata that gets logged
/// as sent, whatever its JSON type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneVoiceRequest {
    pub user_id: Option<String>,
    pub event: Option<serde_json::Value>,
    pub recording_count: Option<serde_json::Value>,
    pub question_index: Option<serde_json::Value>,
}

/// An object under `{userId}/recordings/` as reported by the store listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingObject {
    pub key: String,
    /// `None` when the listing did not report a size.
    pub size: Option<u64>,
}

impl RecordingObject {
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size: Some(size),
        }
    }
}

/// Persisted mapping from a user to their cloned voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRecord {
    /// Empty when the stored record was written without one.
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    /// Older readers look the identifier up under this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_voice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
}

impl VoiceRecord {
    pub fn new(user_id: &str, voice_id: &str, voice_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            voice_id: Some(voice_id.to_string()),
            user_voice_id: Some(voice_id.to_string()),
            voice_name: Some(voice_name.to_string()),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            version: Some(VOICE_RECORD_VERSION),
        }
    }

    /// The cloned voice identifier, accepting records that only carry the legacy field.
    pub fn voice_id(&self) -> Option<&str> {
        self.voice_id
            .as_deref()
            .or(self.user_voice_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// The subset of `{userId}/credentials/login_credentials.json` used for naming voices.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserProfile {
    /// `"{first} {last}"`, with `User` / `Voice` standing in for missing parts.
    pub fn display_name(&self) -> String {
        let first = self
            .first_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("User");
        let last = self
            .last_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Voice");
        format!("{} {}", first, last)
    }
}
