use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// Static key expected in the `API_KEY` or `X-API-Key` header. Empty rejects everything.
    pub api_key: String,
    pub bucket: String,
    pub storage_endpoint: String,
    pub storage_region: String,
    pub storage_access_key_id: String,
    pub storage_secret_access_key: String,
    pub merge_service_url: String,
    pub merge_service_api_key: String,
    pub elevenlabs_api_key: String,
    pub elevenlabs_api_url: String,
    pub cors_origin: String,
    pub max_concurrent_requests: usize,
    pub log_json: bool,
    pub sentry_dsn: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            api_key: env::var("API_KEY").unwrap_or_default(),
            bucket: env::var("GCP_BUCKET_NAME").unwrap_or_else(|_| "memorial-voices".into()),
            storage_endpoint: env::var("STORAGE_ENDPOINT")
                .unwrap_or_else(|_| "https://storage.googleapis.com".into()),
            storage_region: env::var("STORAGE_REGION").unwrap_or_else(|_| "auto".into()),
            storage_access_key_id: env::var("STORAGE_ACCESS_KEY_ID").unwrap_or_default(),
            storage_secret_access_key: env::var("STORAGE_SECRET_ACCESS_KEY").unwrap_or_default(),
            merge_service_url: env::var("MERGE_SERVICE_URL")
                .or_else(|_| env::var("PYGLUE_URL"))
                .unwrap_or_else(|_| "http://localhost:8081".into()),
            merge_service_api_key: env::var("MERGE_SERVICE_API_KEY")
                .or_else(|_| env::var("PYGLUE_API_KEY"))
                .unwrap_or_default(),
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY").unwrap_or_default(),
            elevenlabs_api_url: env::var("ELEVENLABS_API_URL")
                .unwrap_or_else(|_| "https://api.elevenlabs.io/v1".into()),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".into()),
            max_concurrent_requests: env::var("MAX_CONCURRENT_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(8),
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            sentry_dsn: env::var("SENTRY_DSN").unwrap_or_default(),
        }
    }

    /// HMAC keys present; otherwise the default AWS credential chain is used.
    pub fn has_static_storage_credentials(&self) -> bool {
        !self.storage_access_key_id.is_empty() && !self.storage_secret_access_key.is_empty()
    }

    pub fn is_sentry_enabled(&self) -> bool {
        !self.sentry_dsn.is_empty()
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_origin
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
