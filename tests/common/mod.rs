//! In-memory stand-ins for the object store, merge service and cloning API.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;

use voice_clone_orchestrator::config::Config;
use voice_clone_orchestrator::models::{RecordingObject, UserProfile, VoiceRecord};
use voice_clone_orchestrator::services::cloning::{CloneError, VoiceCloneRequest, VoiceCloner};
use voice_clone_orchestrator::services::merge::{AudioMerger, MergeError};
use voice_clone_orchestrator::services::storage::VoiceStore;
use voice_clone_orchestrator::{routes, AppState};

pub const API_KEY: &str = "test-api-key";

/// One second of audio under the 16 KiB/s estimate.
pub const ONE_SECOND: u64 = 16 * 1024;

pub fn test_config() -> Config {
    Config {
        port: 8080,
        api_key: API_KEY.into(),
        bucket: "test-bucket".into(),
        storage_endpoint: "http://localhost:9000".into(),
        storage_region: "auto".into(),
        storage_access_key_id: String::new(),
        storage_secret_access_key: String::new(),
        merge_service_url: "http://localhost:8081".into(),
        merge_service_api_key: "merge-key".into(),
        elevenlabs_api_key: "xi-key".into(),
        elevenlabs_api_url: "http://localhost:8082/v1".into(),
        cors_origin: "*".into(),
        max_concurrent_requests: 4,
        log_json: false,
        sentry_dsn: String::new(),
    }
}

#[derive(Default)]
pub struct FakeStore {
    pub recordings: Vec<RecordingObject>,
    pub existing: Option<VoiceRecord>,
    pub profile: Option<UserProfile>,
    pub fail_lookup: bool,
    pub fail_profile: bool,
    pub fail_save: bool,
    pub list_calls: AtomicUsize,
    pub writes: Mutex<Vec<VoiceRecord>>,
}

impl FakeStore {
    pub fn with_recordings(user_id: &str, sizes: &[u64]) -> Self {
        let recordings = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| RecordingObject::new(format!("{}/recordings/q{}.mp3", user_id, i), *size))
            .collect();
        Self {
            recordings,
            ..Default::default()
        }
    }

    pub fn writes(&self) -> Vec<VoiceRecord> {
        self.writes.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoiceStore for FakeStore {
    async fn list_recordings(&self, _user_id: &str) -> anyhow::Result<Vec<RecordingObject>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup {
            anyhow::bail!("listing unavailable");
        }
        Ok(self.recordings.clone())
    }

    async fn get_voice_record(&self, _user_id: &str) -> anyhow::Result<Option<VoiceRecord>> {
        if self.fail_lookup {
            anyhow::bail!("bucket unavailable");
        }
        Ok(self.existing.clone())
    }

    async fn put_voice_record(&self, record: &VoiceRecord) -> anyhow::Result<()> {
        if self.fail_save {
            anyhow::bail!("write denied");
        }
        self.writes.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn get_user_profile(&self, _user_id: &str) -> anyhow::Result<Option<UserProfile>> {
        if self.fail_profile {
            anyhow::bail!("credentials unreadable");
        }
        Ok(self.profile.clone())
    }
}

#[derive(Default)]
pub struct FakeMerger {
    /// `Some((status, body))` makes every call fail with that response.
    pub failure: Option<(u16, String)>,
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeMerger {
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            failure: Some((status, body.to_string())),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AudioMerger for FakeMerger {
    async fn merge(&self, user_id: &str, recordings: &[String]) -> Result<Bytes, MergeError> {
        self.calls
            .lock()
            .unwrap()
            .push((user_id.to_string(), recordings.to_vec()));
        match &self.failure {
            Some((status, body)) => Err(MergeError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(Bytes::from_static(b"ID3merged-audio")),
        }
    }
}

pub struct FakeCloner {
    /// `None` makes every call fail.
    pub voice_id: Option<String>,
    pub requests: Mutex<Vec<VoiceCloneRequest>>,
}

impl FakeCloner {
    pub fn returning(voice_id: &str) -> Self {
        Self {
            voice_id: Some(voice_id.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            voice_id: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl VoiceCloner for FakeCloner {
    async fn clone_voice(&self, request: VoiceCloneRequest) -> Result<String, CloneError> {
        self.requests.lock().unwrap().push(request);
        match &self.voice_id {
            Some(id) => Ok(id.clone()),
            None => Err(CloneError::Status {
                status: 422,
                body: "voice limit reached".into(),
            }),
        }
    }
}

pub struct Harness {
    pub store: Arc<FakeStore>,
    pub merger: Arc<FakeMerger>,
    pub cloner: Arc<FakeCloner>,
    pub app: Router,
}

impl Harness {
    pub fn new(store: FakeStore, merger: FakeMerger, cloner: FakeCloner) -> Self {
        let store = Arc::new(store);
        let merger = Arc::new(merger);
        let cloner = Arc::new(cloner);
        let state = AppState {
            config: test_config(),
            store: store.clone(),
            merger: merger.clone(),
            cloner: cloner.clone(),
        };
        Self {
            store,
            merger,
            cloner,
            app: routes::create_router(state),
        }
    }

    pub fn downstream_calls(&self) -> usize {
        self.merger.call_count() + self.cloner.call_count()
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

/// `POST /clone-voice` with the given auth header and raw JSON body.
pub fn clone_request(auth: Option<(&str, &str)>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/clone-voice")
        .header("content-type", "application/json");
    if let Some((name, value)) = auth {
        builder = builder.header(name, value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn authed_request(body: &str) -> Request<Body> {
    clone_request(Some(("X-API-Key", API_KEY)), body)
}
