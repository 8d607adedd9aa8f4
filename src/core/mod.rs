//=========================================================================
// Core Subsystems
//
// Platform-independent engine subsystems.
//
// Responsibilities:
// - `input`: event normalization, key-state tracking, joystick debounce
// - `video`: window and rendering-context lifecycle
// - `audio`: audio bootstrap with graceful degradation
//
// Notes:
// Every subsystem here is headless: hardware access goes through a
// backend trait so the logic can be exercised without a display, an
// audio device, or a controller attached. The winit-facing backends
// live in the `platform` module.
//
//=========================================================================

pub mod audio;
pub mod input;
pub mod video;
