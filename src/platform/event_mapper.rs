//=========================================================================
// Platform Event Mapper
//
// Converts Winit input events to engine-level `RawEvent` types.
// Provides a clean separation between OS-specific input and the
// engine's internal event representation.
//
// Responsibilities:
// - Translate keyboard, mouse button, and cursor events
// - Synthesize relative mouse deltas from absolute cursor positions
//   (Winit window events carry no delta)
// - Provide fallbacks (`Unidentified`) for unmapped inputs
//
//=========================================================================

use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::KeyCode as WinitKeyCode;
use winit::keyboard::PhysicalKey;

use crate::core::input::event::{KeyCode, MouseButton, RawEvent};

//=== Key Conversion ======================================================
//
// Maps `WinitKeyCode` values to the engine's internal `KeyCode` enum.
// Only a subset of codes is supported; all others map to `Unidentified`.
//

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Special keys -----------------------------------------------------
            Backspace => KeyCode::Backspace,
            Tab => KeyCode::Tab,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Space => KeyCode::Space,
            Delete => KeyCode::Delete,

            //--- Numeric keys -----------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrow keys -------------------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

//=== Mouse Conversion ====================================================
//
// Maps Winit mouse button identifiers to internal mouse button types.
//

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=== EventMapper =========================================================

/// Stateful Winit-to-engine event converter.
///
/// Tracks the previous cursor position so `CursorMoved` events can carry
/// a relative delta alongside the absolute position. The first motion
/// after construction (or after the cursor re-enters the window) reports
/// a zero delta.
pub(crate) struct EventMapper {
    last_cursor: Option<(f32, f32)>,
    last_button_position: (f32, f32),
}

impl EventMapper {
    pub fn new() -> Self {
        Self {
            last_cursor: None,
            last_button_position: (0.0, 0.0),
        }
    }

    /// Converts a Winit window event into a [`RawEvent`].
    ///
    /// Unsupported events map to `RawEvent::Unidentified`, which the
    /// normalizer ignores.
    pub fn map_window_event(&mut self, event: &WindowEvent) -> RawEvent {
        match event {
            //--- Keyboard Input ------------------------------------------
            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key, state, .. },
                ..
            } => {
                let key = match physical_key {
                    PhysicalKey::Code(code) => KeyCode::from(*code),
                    _ => KeyCode::Unidentified,
                };
                match state {
                    ElementState::Pressed => RawEvent::KeyDown(key),
                    ElementState::Released => RawEvent::KeyUp(key),
                }
            }

            //--- Mouse Button Input --------------------------------------
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from(*button);
                let (x, y) = self.last_button_position;
                match state {
                    ElementState::Pressed => RawEvent::MouseButtonDown { button, x, y },
                    ElementState::Released => RawEvent::MouseButtonUp { button, x, y },
                }
            }

            //--- Mouse Movement ------------------------------------------
            WindowEvent::CursorMoved { position, .. } => {
                let x = position.x as f32;
                let y = position.y as f32;
                let (dx, dy) = match self.last_cursor {
                    Some((px, py)) => (x - px, y - py),
                    None => (0.0, 0.0),
                };
                self.last_cursor = Some((x, y));
                self.last_button_position = (x, y);
                RawEvent::MouseMoved { x, y, dx, dy }
            }

            WindowEvent::CursorLeft { .. } => {
                // Forget the anchor so re-entry doesn't produce a jump delta.
                self.last_cursor = None;
                RawEvent::Unidentified
            }

            //--- Unhandled Events ----------------------------------------
            _ => RawEvent::Unidentified,
        }
    }

    /// Resets the delta anchor after a pointer warp so the warp itself
    /// does not register as motion.
    pub fn reset_cursor_anchor(&mut self) {
        self.last_cursor = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
