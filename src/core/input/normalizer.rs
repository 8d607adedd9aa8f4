//=========================================================================
// Event Normalizer
//=========================================================================
//
// Consumes raw platform events one at a time, updates the key-state
// table, joystick registry, and mouse state, and invokes the injected
// callback bundle synchronously before returning.
//
// Architecture:
//   RawEvent → handle_event() → tables updated → InputCallbacks invoked
//
// Nothing is queued or deferred; dispatch happens on the caller's thread
// and must not be driven from more than one thread at once.
//
//=========================================================================

//=== External Crates =====================================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{ButtonState, InputKey, KeyCode, KeyState, MouseButton, RawEvent};
use super::joystick::JoystickRegistry;
use super::key_table::KeyStateTable;
use super::mouse::MouseState;

//=== InputCallbacks ======================================================

/// Externally supplied input handler bundle.
///
/// The normalizer only borrows the bundle for the duration of one
/// dispatch; it never owns or stores it. All handlers default to no-ops,
/// so implementors override only what they consume.
pub trait InputCallbacks {
    /// A key (physical or synthesized) changed state.
    fn keyboard(&mut self, _state: KeyState, _key: InputKey) {}

    /// A mouse button changed state at the given window position.
    fn mouse_button(&mut self, _button: MouseButton, _state: ButtonState, _x: f32, _y: f32) {}

    /// The cursor moved to the given absolute window position.
    fn mouse_motion(&mut self, _x: f32, _y: f32) {}
}

/// Callback bundle that discards everything. Useful when only the
/// polled state (key table, mouse delta) is of interest.
pub struct NullCallbacks;

impl InputCallbacks for NullCallbacks {}

//=== EventNormalizer =====================================================

/// Owns the input bookkeeping tables and performs per-event dispatch.
pub struct EventNormalizer {
    pub(super) keys: KeyStateTable,
    pub(super) joysticks: JoystickRegistry,
    pub(super) mouse: MouseState,
}

impl EventNormalizer {
    pub fn new() -> Self {
        Self {
            keys: KeyStateTable::new(),
            joysticks: JoystickRegistry::new(),
            mouse: MouseState::new(),
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Processes one raw event: updates internal tables, then invokes
    /// the matching callback before returning.
    ///
    /// Joystick events whose instance id is not in the registry are
    /// dropped silently, as are unidentified events. Key codes outside
    /// the bounded table are not stored but still reach the callback.
    pub fn handle_event(&mut self, event: RawEvent, callbacks: &mut dyn InputCallbacks) {
        match event {
            RawEvent::KeyDown(code) => self.keyboard_event(KeyState::Down, code, callbacks),
            RawEvent::KeyUp(code) => self.keyboard_event(KeyState::Up, code, callbacks),

            RawEvent::JoystickAxis { id, axis, value } => {
                let Some(slot) = self.joysticks.slot_of(id) else {
                    trace!(target: "input", "axis event for unknown joystick {:?} dropped", id);
                    return;
                };
                if let Some((key, state)) = self.joysticks.axis_transition(slot, axis, value) {
                    self.keys.set(key.code(), state);
                    callbacks.keyboard(state, key);
                }
            }

            RawEvent::JoystickButton { id, button, down } => {
                let Some(slot) = self.joysticks.slot_of(id) else {
                    trace!(target: "input", "button event for unknown joystick {:?} dropped", id);
                    return;
                };
                let key = InputKey::JoystickButton {
                    slot: slot as u8,
                    button,
                };
                let state = if down { KeyState::Down } else { KeyState::Up };
                self.keys.set(key.code(), state);
                callbacks.keyboard(state, key);
            }

            RawEvent::MouseButtonDown { button, x, y } => {
                callbacks.mouse_button(button, ButtonState::Pressed, x, y);
            }

            RawEvent::MouseButtonUp { button, x, y } => {
                callbacks.mouse_button(button, ButtonState::Released, x, y);
            }

            RawEvent::MouseMoved { x, y, dx, dy } => {
                self.mouse.record_motion(x, y, dx, dy);
                callbacks.mouse_motion(x, y);
            }

            RawEvent::Unidentified => {}
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn keyboard_event(
        &mut self,
        state: KeyState,
        code: KeyCode,
        callbacks: &mut dyn InputCallbacks,
    ) {
        self.keys.set(code.code(), state);
        callbacks.keyboard(state, InputKey::Keyboard(code));
    }
}

impl Default for EventNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
