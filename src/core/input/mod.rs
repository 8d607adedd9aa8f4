//=========================================================================
// Input System
//
// Engine-facing facade over input normalization and state tracking.
//
// Responsibilities:
// - Own the event normalizer (key table, joystick registry, mouse state)
//   and the custom-key name table
// - Feed raw platform events through the normalizer with an injected
//   callback bundle
// - Expose the query surface: key state by code, keyname lookup, mouse
//   position/delta, joystick bookkeeping
//
// Notes:
// All state lives in this object rather than process-wide globals, so an
// engine (or a test) can stand up multiple isolated instances.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
pub mod joystick;
pub mod keynames;
mod key_table;
mod mouse;
mod normalizer;

//=== Internal Imports ====================================================

use event::{codes, KeyCode, KeyState, RawEvent};
use joystick::JoystickProvider;
use keynames::{CustomKeyTable, UNKNOWN_CUSTOM_KEY};
use normalizer::EventNormalizer;

//=== Public Re-exports ===================================================

pub use normalizer::{InputCallbacks, NullCallbacks};

//=== InputSystem =========================================================

/// Owns the engine's input state and performs event normalization.
///
/// Raw events enter through [`InputSystem::handle_event`]; everything
/// else is a read-only query or a small piece of configuration.
pub struct InputSystem {
    normalizer: EventNormalizer,
    custom_keys: CustomKeyTable,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            normalizer: EventNormalizer::new(),
            custom_keys: CustomKeyTable::new(),
        }
    }

    //--- Initialization ---------------------------------------------------

    /// Opens joystick devices from the provider (capped by the
    /// `LUCENT_MAX_JOY` override) and rebuilds the custom keyname table
    /// for the opened slots. Returns the number of opened slots.
    pub fn init_joysticks<P: JoystickProvider>(&mut self, provider: &mut P) -> usize {
        let opened = self.normalizer.joysticks.init(provider);
        self.custom_keys.rebuild(opened);
        opened
    }

    /// [`InputSystem::init_joysticks`] with an explicit cap; used by
    /// tests and embedders that resolve configuration themselves.
    pub fn init_joysticks_with_cap<P: JoystickProvider>(
        &mut self,
        provider: &mut P,
        cap: usize,
    ) -> usize {
        let opened = self.normalizer.joysticks.init_with_cap(provider, cap);
        self.custom_keys.rebuild(opened);
        opened
    }

    //--- Event Dispatch ---------------------------------------------------

    /// Normalizes one raw event, updating internal tables and invoking
    /// the callback bundle synchronously.
    pub fn handle_event(&mut self, event: RawEvent, callbacks: &mut dyn InputCallbacks) {
        self.normalizer.handle_event(event, callbacks);
    }

    //--- Queries ----------------------------------------------------------

    /// Up/down state of a key by serialization code. Codes outside the
    /// bounded table always report `Up`.
    pub fn key_state(&self, code: u16) -> KeyState {
        self.normalizer.keys.get(code)
    }

    /// Human-readable name of a key code.
    ///
    /// Codes below the custom-key threshold resolve through the platform
    /// name table; codes at or above it through the custom-key table,
    /// falling back to `"unknown custom key"`.
    pub fn key_name(&self, code: u16) -> &str {
        if code < codes::CUSTOM_KEY_BASE {
            KeyCode::from_code(code).name()
        } else {
            self.custom_keys.lookup(code).unwrap_or(UNKNOWN_CUSTOM_KEY)
        }
    }

    /// Relative mouse motion accumulated since the last warp-to-origin.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.normalizer.mouse.delta()
    }

    /// Last absolute cursor position.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.normalizer.mouse.position()
    }

    /// Number of opened joystick slots.
    pub fn joystick_count(&self) -> usize {
        self.normalizer.joysticks.count()
    }

    //--- Configuration ----------------------------------------------------

    /// Resets the accumulated mouse delta to `(0, 0)`.
    pub fn warp_mouse_to_origin(&mut self) {
        self.normalizer.mouse.warp_to_origin();
    }

    /// Sets the joystick deadzone as a fraction of full deflection.
    pub fn set_joystick_deadzone(&mut self, fraction: f32) {
        self.normalizer.joysticks.set_deadzone(fraction);
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
