//=========================================================================
// Audio System
//
// Audio subsystem bootstrap with graceful degradation.
//
// Audio is strictly optional: a failed init is logged as a warning and
// the engine keeps running silently. Callers check `is_available()`
// before driving any audio work. Init is idempotent and retriable; a
// later call may succeed after an earlier failure (for example once an
// output device is plugged in).
//
//=========================================================================

//=== External Crates =====================================================

use log::{info, warn};

//=== AudioError ==========================================================

/// Audio subsystem bring-up failure. Never fatal to the engine.
#[derive(Debug)]
pub struct AudioError(pub String);

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "couldn't initialize audio: {}", self.0)
    }
}

impl std::error::Error for AudioError {}

//=== AudioBackend ========================================================

/// Backend seam for the audio subsystem.
pub trait AudioBackend {
    fn init(&mut self) -> Result<(), AudioError>;
}

//=== AudioSystem =========================================================

/// Tracks whether the audio subsystem came up.
pub struct AudioSystem {
    available: bool,
}

impl AudioSystem {
    pub fn new() -> Self {
        Self { available: false }
    }

    /// Brings up the audio subsystem. A repeated call after success is a
    /// no-op; after failure it retries.
    pub fn init<B: AudioBackend>(&mut self, backend: &mut B) {
        if self.available {
            return;
        }
        match backend.init() {
            Ok(()) => {
                info!(target: "audio", "audio subsystem initialized");
                self.available = true;
            }
            Err(e) => {
                warn!(target: "audio", "{} - continuing without sound", e);
            }
        }
    }

    /// Whether audio init succeeded at some point.
    pub fn is_available(&self) -> bool {
        self.available
    }
}

impl Default for AudioSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct MockAudio {
        results: Vec<Result<(), AudioError>>,
        init_calls: usize,
    }

    impl MockAudio {
        fn scripted(results: Vec<Result<(), AudioError>>) -> Self {
            Self {
                results,
                init_calls: 0,
            }
        }
    }

    impl AudioBackend for MockAudio {
        fn init(&mut self) -> Result<(), AudioError> {
            self.init_calls += 1;
            if self.results.is_empty() {
                Ok(())
            } else {
                self.results.remove(0)
            }
        }
    }

    #[test]
    fn successful_init_marks_available() {
        let mut audio = AudioSystem::new();
        let mut backend = MockAudio::scripted(vec![Ok(())]);

        audio.init(&mut backend);
        assert!(audio.is_available());
    }

    #[test]
    fn failed_init_degrades_gracefully() {
        let mut audio = AudioSystem::new();
        let mut backend = MockAudio::scripted(vec![Err(AudioError("no device".into()))]);

        audio.init(&mut backend);
        assert!(!audio.is_available());
    }

    #[test]
    fn init_after_success_is_a_noop() {
        let mut audio = AudioSystem::new();
        let mut backend = MockAudio::scripted(vec![Ok(())]);

        audio.init(&mut backend);
        audio.init(&mut backend);
        assert_eq!(backend.init_calls, 1);
        assert!(audio.is_available());
    }

    #[test]
    fn init_after_failure_retries() {
        let mut audio = AudioSystem::new();
        let mut backend =
            MockAudio::scripted(vec![Err(AudioError("no device".into())), Ok(())]);

        audio.init(&mut backend);
        assert!(!audio.is_available());

        audio.init(&mut backend);
        assert!(audio.is_available());
        assert_eq!(backend.init_calls, 2);
    }
}
