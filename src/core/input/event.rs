//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (Winit, an SDL-style
// backend, a test harness) into a unified format consumed by the event
// normalizer.
//
// Responsibilities:
// - Represent keyboard, joystick, and mouse inputs in a portable way
// - Keep keyboard and synthesized joystick keys apart in the type system
//   (`InputKey` is a tagged union, not an overlapping integer range)
// - Preserve stable numeric key codes at the serialization boundary only
//   (`InputKey::code`), where the bounded key-state table and the keyname
//   lookup need a flat index space
//
// Event Flow:
// ```text
// Platform Layer (Winit / injected)
//         ↓
//     RawEvent (this module)
//         ↓
//     EventNormalizer (updates tables, invokes callbacks)
// ```
//
//=========================================================================

//=== Serialization-Boundary Codes ========================================
//
// Flat numeric key-code space shared with config files and the bounded
// key-state table. Keyboard codes sit below `CUSTOM_KEY_BASE`; each
// joystick slot owns a contiguous block of `JOY_OFFSET` codes above it:
// four axis directions first, then the buttons.
//
pub mod codes {
    /// Size of the bounded key-state table. Codes at or above this are
    /// never stored.
    pub const MAX_KEYS: usize = 1024;

    /// First synthesized (non-keyboard) key code. Keyname lookups at or
    /// above this threshold go through the custom-key table.
    pub const CUSTOM_KEY_BASE: u16 = 512;

    /// Number of codes reserved per joystick slot.
    pub const JOY_OFFSET: u16 = 32;

    /// Codes per slot spent on axis directions (left/right/up/down).
    pub const JOY_AXIS_DIRECTIONS: u16 = 4;

    /// Buttons addressable per slot within its code block.
    pub const JOY_BUTTONS_PER_SLOT: u8 = (JOY_OFFSET - JOY_AXIS_DIRECTIONS) as u8;
}

//=== KeyState ============================================================

/// Up/down state of a key (physical or synthesized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Up,
    Down,
}

impl KeyState {
    /// Returns `true` for [`KeyState::Down`].
    pub fn is_down(self) -> bool {
        matches!(self, Self::Down)
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::Up
    }
}

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, thumb buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== ButtonState =========================================================

/// Pressed/released state of a mouse button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// Discriminants are the stable serialization codes (below
/// [`codes::CUSTOM_KEY_BASE`]) used by the key-state table and config
/// files; they follow the classic keysym layout so existing key-binding
/// data keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KeyCode {
    /// Fallback for keys the platform layer does not map.
    Unidentified = 0,

    //--- Special Keys -----------------------------------------------------

    Backspace = 8,
    Tab = 9,
    Enter = 13,
    Escape = 27,
    Space = 32,
    Delete = 127,

    //--- Numeric Keys -----------------------------------------------------

    Digit0 = 48, Digit1 = 49, Digit2 = 50, Digit3 = 51, Digit4 = 52,
    Digit5 = 53, Digit6 = 54, Digit7 = 55, Digit8 = 56, Digit9 = 57,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA = 97, KeyB = 98, KeyC = 99, KeyD = 100, KeyE = 101, KeyF = 102,
    KeyG = 103, KeyH = 104, KeyI = 105, KeyJ = 106, KeyK = 107, KeyL = 108,
    KeyM = 109, KeyN = 110, KeyO = 111, KeyP = 112, KeyQ = 113, KeyR = 114,
    KeyS = 115, KeyT = 116, KeyU = 117, KeyV = 118, KeyW = 119, KeyX = 120,
    KeyY = 121, KeyZ = 122,

    //--- Arrow Keys -------------------------------------------------------

    ArrowUp = 273,
    ArrowDown = 274,
    ArrowRight = 275,
    ArrowLeft = 276,
}

impl KeyCode {
    /// Returns the stable serialization code for this key.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Reverses [`KeyCode::code`]. Unknown codes map to `Unidentified`.
    pub fn from_code(code: u16) -> Self {
        use KeyCode::*;
        match code {
            8 => Backspace,
            9 => Tab,
            13 => Enter,
            27 => Escape,
            32 => Space,
            127 => Delete,
            48 => Digit0, 49 => Digit1, 50 => Digit2, 51 => Digit3,
            52 => Digit4, 53 => Digit5, 54 => Digit6, 55 => Digit7,
            56 => Digit8, 57 => Digit9,
            97 => KeyA, 98 => KeyB, 99 => KeyC, 100 => KeyD, 101 => KeyE,
            102 => KeyF, 103 => KeyG, 104 => KeyH, 105 => KeyI, 106 => KeyJ,
            107 => KeyK, 108 => KeyL, 109 => KeyM, 110 => KeyN, 111 => KeyO,
            112 => KeyP, 113 => KeyQ, 114 => KeyR, 115 => KeyS, 116 => KeyT,
            117 => KeyU, 118 => KeyV, 119 => KeyW, 120 => KeyX, 121 => KeyY,
            122 => KeyZ,
            273 => ArrowUp,
            274 => ArrowDown,
            275 => ArrowRight,
            276 => ArrowLeft,
            _ => Unidentified,
        }
    }

    /// Human-readable name of the key, as shown in key-binding UIs.
    pub fn name(self) -> &'static str {
        use KeyCode::*;
        match self {
            Unidentified => "unknown key",
            Backspace => "Backspace",
            Tab => "Tab",
            Enter => "Return",
            Escape => "Escape",
            Space => "Space",
            Delete => "Delete",
            Digit0 => "0", Digit1 => "1", Digit2 => "2", Digit3 => "3",
            Digit4 => "4", Digit5 => "5", Digit6 => "6", Digit7 => "7",
            Digit8 => "8", Digit9 => "9",
            KeyA => "A", KeyB => "B", KeyC => "C", KeyD => "D", KeyE => "E",
            KeyF => "F", KeyG => "G", KeyH => "H", KeyI => "I", KeyJ => "J",
            KeyK => "K", KeyL => "L", KeyM => "M", KeyN => "N", KeyO => "O",
            KeyP => "P", KeyQ => "Q", KeyR => "R", KeyS => "S", KeyT => "T",
            KeyU => "U", KeyV => "V", KeyW => "W", KeyX => "X", KeyY => "Y",
            KeyZ => "Z",
            ArrowUp => "Up",
            ArrowDown => "Down",
            ArrowRight => "Right",
            ArrowLeft => "Left",
        }
    }
}

//=== Joystick Identifiers ================================================

/// Backend-assigned instance id of a connected joystick device.
///
/// Distinct from the slot index: the id identifies the device to the
/// backend, the slot is the registry position it was opened into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoystickId(pub u32);

/// Logical axis of a direction-coded joystick input.
///
/// Axis index 1 is conventionally vertical; every other axis index is
/// treated as horizontal, matching the legacy direction-key layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Sign of an axis deflection past the deadzone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    Negative,
    Positive,
}

//=== InputKey ============================================================

/// A key as seen by callbacks and the key-state table: either a physical
/// keyboard key or a synthesized joystick input.
///
/// The tagged representation keeps keyboard and joystick inputs apart in
/// the API; the flat numeric space of the original key-binding format is
/// reachable only through [`InputKey::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// A physical keyboard key.
    Keyboard(KeyCode),

    /// A joystick axis pushed past the deadzone in one direction.
    JoystickAxis {
        slot: u8,
        axis: Axis,
        direction: AxisDirection,
    },

    /// A joystick button.
    JoystickButton { slot: u8, button: u8 },
}

impl InputKey {
    /// Packs this key into the flat serialization code space.
    ///
    /// Keyboard keys keep their keysym value. Joystick inputs pack as
    /// `CUSTOM_KEY_BASE + slot * JOY_OFFSET`, plus the direction offset
    /// (`+2` vertical, `+1` positive) for axes, or
    /// `JOY_AXIS_DIRECTIONS + button` for buttons.
    pub fn code(self) -> u16 {
        match self {
            Self::Keyboard(key) => key.code(),
            Self::JoystickAxis { slot, axis, direction } => {
                let mut code = codes::CUSTOM_KEY_BASE + u16::from(slot) * codes::JOY_OFFSET;
                if axis == Axis::Vertical {
                    code += 2;
                }
                if direction == AxisDirection::Positive {
                    code += 1;
                }
                code
            }
            Self::JoystickButton { slot, button } => {
                codes::CUSTOM_KEY_BASE
                    + u16::from(slot) * codes::JOY_OFFSET
                    + codes::JOY_AXIS_DIRECTIONS
                    + u16::from(button)
            }
        }
    }
}

//=== RawEvent ============================================================

/// One raw input event from the platform layer, before normalization.
///
/// Mouse motion carries both the absolute position and the relative
/// delta reported by the platform; the normalizer accumulates the
/// latter. Joystick events reference devices by backend instance id and
/// are dropped silently when the id is not in the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// Keyboard key pressed.
    KeyDown(KeyCode),

    /// Keyboard key released.
    KeyUp(KeyCode),

    /// Joystick axis moved. `value` is the full-range axis reading.
    JoystickAxis {
        id: JoystickId,
        axis: u8,
        value: i16,
    },

    /// Joystick button pressed or released.
    JoystickButton {
        id: JoystickId,
        button: u8,
        down: bool,
    },

    /// Mouse button pressed at the given window position.
    MouseButtonDown { button: MouseButton, x: f32, y: f32 },

    /// Mouse button released at the given window position.
    MouseButtonUp { button: MouseButton, x: f32, y: f32 },

    /// Mouse moved to an absolute position, with the relative delta.
    MouseMoved { x: f32, y: f32, dx: f32, dy: f32 },

    /// Unrecognized or unsupported event; ignored by the normalizer.
    Unidentified,
}

//=========================================================================
// Unit Tests
//=========================================================================
