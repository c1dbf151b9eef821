//! Keystroke feedback cues.
//!
//! The controller fires one cue per dispatched event. Cues are independent:
//! no queueing, no deduplication, overlapping playback is fine, and a cue that
//! fails to play is logged and forgotten.

use crate::config::FeedbackConfig;
use std::path::Path;

/// Sink for keystroke cues.
pub trait FeedbackEmitter {
    /// Plays the cue immediately. Must not block and must not fail.
    fn emit(&mut self);
}

/// Emitter that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl FeedbackEmitter for SilentFeedback {
    fn emit(&mut self) {}
}

/// Builds the emitter described by `config`.
///
/// Falls back to [`SilentFeedback`] when feedback is disabled, no sound file
/// is configured, or audio output cannot be opened.
pub fn from_config(config: &FeedbackConfig) -> Box<dyn FeedbackEmitter> {
    if !config.enabled {
        return Box::new(SilentFeedback);
    }

    let Some(path) = config.sound.as_ref() else {
        log::debug!("Feedback enabled but no sound configured");
        return Box::new(SilentFeedback);
    };

    open_clip(path, config.volume)
}

#[cfg(feature = "audio")]
fn open_clip(path: &Path, volume: f32) -> Box<dyn FeedbackEmitter> {
    match clip::ClipFeedback::open(path, volume) {
        Ok(emitter) => {
            log::info!("Keystroke feedback loaded from {}", path.display());
            Box::new(emitter)
        }
        Err(err) => {
            log::warn!("Keystroke feedback unavailable: {err}");
            Box::new(SilentFeedback)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_clip(path: &Path, _volume: f32) -> Box<dyn FeedbackEmitter> {
    log::warn!(
        "Keystroke sound {} configured but built without the `audio` feature",
        path.display()
    );
    Box::new(SilentFeedback)
}

#[cfg(feature = "audio")]
pub use clip::{ClipFeedback, FeedbackError};

#[cfg(feature = "audio")]
mod clip {
    use super::FeedbackEmitter;
    use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;
    use thiserror::Error;

    /// Errors raised while preparing a feedback cue.
    #[derive(Debug, Error)]
    pub enum FeedbackError {
        #[error("Failed to read sound file: {0}")]
        Io(#[from] std::io::Error),

        #[error("Audio output error: {0}")]
        Audio(String),
    }

    /// Plays a sound file through the default output for every cue.
    pub struct ClipFeedback {
        stream: OutputStream,
        clip: Arc<[u8]>,
        volume: f32,
    }

    impl ClipFeedback {
        /// Loads `path` into memory and opens the default output stream.
        pub fn open(path: &Path, volume: f32) -> Result<Self, FeedbackError> {
            let clip: Arc<[u8]> = std::fs::read(path)?.into();

            // Validate the clip once so a bad file is reported up front.
            Decoder::new(Cursor::new(clip.clone()))
                .map_err(|e| FeedbackError::Audio(format!("cannot decode clip: {e}")))?;

            let stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| FeedbackError::Audio(e.to_string()))?;

            Ok(Self {
                stream,
                clip,
                volume,
            })
        }

        fn play(&self) -> Result<(), FeedbackError> {
            let source = Decoder::new(Cursor::new(self.clip.clone()))
                .map_err(|e| FeedbackError::Audio(e.to_string()))?;
            let sink = Sink::connect_new(self.stream.mixer());
            sink.set_volume(self.volume);
            sink.append(source);
            sink.detach();
            Ok(())
        }
    }

    impl FeedbackEmitter for ClipFeedback {
        fn emit(&mut self) {
            if let Err(err) = self.play() {
                log::debug!("Keystroke cue dropped: {err}");
            }
        }
    }
}
