pub mod auth;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use services::cloning::VoiceCloner;
use services::merge::AudioMerger;
use services::storage::VoiceStore;

#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub store: Arc<dyn VoiceStore>,
    pub merger: Arc<dyn AudioMerger>,
    pub cloner: Arc<dyn VoiceCloner>,
}
