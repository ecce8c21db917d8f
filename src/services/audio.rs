//! Size-based duration estimate for stored recordings.
//!
//! Recordings are never decoded. Duration is approximated from byte size
//! assuming MP3 at ~128 kbps, i.e. 16 KiB per second of audio.

use crate::models::RecordingObject;

/// Extensions counted as recordings; anything else under the prefix is ignored.
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".webm", ".m4a"];

/// Assumed bytes of audio per second.
pub const BYTES_PER_SECOND: f64 = 16.0 * 1024.0;

/// Minimum estimated audio required before a clone is attempted.
pub const MIN_AUDIO_SECONDS: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioEstimate {
    pub duration_seconds: f64,
    pub file_count: usize,
    pub total_bytes: u64,
    /// Keys of the counted recordings, in listing order.
    pub recordings: Vec<String>,
}

impl AudioEstimate {
    pub fn is_sufficient(&self) -> bool {
        self.duration_seconds >= MIN_AUDIO_SECONDS
    }

    /// Duration rounded to one decimal place, as reported to callers.
    pub fn rounded_duration(&self) -> f64 {
        round_tenth(self.duration_seconds)
    }
}

pub fn is_audio_key(key: &str) -> bool {
    AUDIO_EXTENSIONS.iter().any(|ext| key.ends_with(ext))
}

/// Sum the sizes of the audio objects and convert to seconds.
pub fn estimate_duration(objects: &[RecordingObject]) -> AudioEstimate {
    let audio: Vec<&RecordingObject> = objects.iter().filter(|o| is_audio_key(&o.key)).collect();
    let total_bytes: u64 = audio.iter().filter_map(|o| o.size).sum();

    AudioEstimate {
        duration_seconds: total_bytes as f64 / BYTES_PER_SECOND,
        file_count: audio.len(),
        total_bytes,
        recordings: audio.iter().map(|o| o.key.clone()).collect(),
    }
}

pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
