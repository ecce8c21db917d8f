//! The clone workflow: lookup, estimate, merge, clone, persist.
//!
//! Steps run strictly in order and are never retried. The first failure ends
//! the run; nothing after it is attempted.

use tracing::Instrument;

use crate::models::VoiceRecord;
use crate::services::audio::{estimate_duration, AudioEstimate};
use crate::services::cloning::{CloneError, VoiceCloneRequest};
use crate::services::merge::MergeError;
use crate::AppState;

/// How a workflow run ended when nothing went wrong downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum CloneOutcome {
    /// A voice record already existed; nothing was called.
    Skipped { voice_id: String },
    /// Not enough estimated audio; merge and clone were not called.
    InsufficientAudio(AudioEstimate),
    Cloned {
        voice_id: String,
        voice_name: String,
        estimate: AudioEstimate,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("storage lookup failed: {0:#}")]
    Lookup(#[source] anyhow::Error),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Clone(#[from] CloneError),
    #[error("failed to save voice record: {source:#}")]
    Save {
        voice_id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Run the full workflow for an already validated `user_id`.
pub async fn run(state: &AppState, user_id: &str) -> Result<CloneOutcome, WorkflowError> {
    let span = tracing::info_span!(
        "clone_voice",
        user_id = %user_id,
        request_id = %uuid::Uuid::new_v4()
    );
    run_steps(state, user_id).instrument(span).await
}

async fn run_steps(state: &AppState, user_id: &str) -> Result<CloneOutcome, WorkflowError> {
    let existing = state
        .store
        .get_voice_record(user_id)
        .await
        .map_err(WorkflowError::Lookup)?;
    if let Some(voice_id) = existing.as_ref().and_then(|r| r.voice_id()) {
        tracing::info!("Voice already exists ({}), skipping clone", voice_id);
        return Ok(CloneOutcome::Skipped {
            voice_id: voice_id.to_string(),
        });
    }

    let objects = state
        .store
        .list_recordings(user_id)
        .await
        .map_err(WorkflowError::Lookup)?;
    let estimate = estimate_duration(&objects);
    tracing::info!(
        "Found {} audio files, {:.2}KB, estimated {:.1}s",
        estimate.file_count,
        estimate.total_bytes as f64 / 1024.0,
        estimate.duration_seconds
    );

    if !estimate.is_sufficient() {
        tracing::info!("Insufficient audio: {:.1}s", estimate.duration_seconds);
        return Ok(CloneOutcome::InsufficientAudio(estimate));
    }

    let audio = state.merger.merge(user_id, &estimate.recordings).await?;

    let voice_name = match state.store.get_user_profile(user_id).await {
        Ok(profile) => profile.unwrap_or_default().display_name(),
        Err(e) => {
            tracing::warn!("User profile lookup failed, using default name: {:#}", e);
            crate::models::UserProfile::default().display_name()
        }
    };

    let voice_id = state
        .cloner
        .clone_voice(VoiceCloneRequest {
            user_id: user_id.to_string(),
            audio,
            name: voice_name.clone(),
            description: format!("AI voice clone for {}", voice_name),
        })
        .await?;

    let record = VoiceRecord::new(user_id, &voice_id, &voice_name);
    if let Err(source) = state.store.put_voice_record(&record).await {
        tracing::error!("Saving voice record failed: {:#}", source);
        return Err(WorkflowError::Save { voice_id, source });
    }

    tracing::info!(
        voice_id = %voice_id,
        voice_name = %voice_name,
        duration = estimate.rounded_duration(),
        "Voice cloning complete"
    );

    Ok(CloneOutcome::Cloned {
        voice_id,
        voice_name,
        estimate,
    })
}
