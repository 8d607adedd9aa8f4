//=========================================================================
// Lucent Platform — Library Root
//
// This crate defines the public API surface of the Lucent platform
// layer: windowing, input normalization, and audio bootstrap for a
// realtime 3D engine.
//
// Responsibilities:
// - Expose the subsystem interfaces (`core::input`, `core::video`,
//   `core::audio`) for headless use and testing
// - Expose the Winit-backed `Platform` as the main entry point
// - Keep OS-specific plumbing (`platform` internals) hidden behind it
//
// Typical usage:
// ```no_run
// use lucent_platform::prelude::*;
//
// struct Game;
// impl InputCallbacks for Game {}
//
// fn main() -> Result<(), PlatformError> {
//     let mut video = VideoSystem::new();
//     video.set_window_mode(0, 0, 800, 600);
//
//     let platform = Platform::new("Lucent", video, Game);
//     platform.run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the platform-independent subsystems (input
// normalization, the window lifecycle state machine, audio bootstrap).
// Each is usable headlessly through its backend trait.
//
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, Winit integration,
// event loop, etc.). Only the `Platform` entry point and its error type
// are part of the public API surface.
//
mod platform;

//--- Public Exports ------------------------------------------------------

pub use platform::{Platform, PlatformError};

pub mod prelude;
