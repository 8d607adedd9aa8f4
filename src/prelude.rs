//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lucent_platform::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Platform entry point
pub use crate::{Platform, PlatformError};

// Input system
pub use crate::core::input::event::{
    Axis, AxisDirection, ButtonState, InputKey, JoystickId, KeyCode, KeyState, MouseButton,
    RawEvent,
};
pub use crate::core::input::joystick::{JoystickDevice, JoystickError, JoystickProvider};
pub use crate::core::input::{InputCallbacks, InputSystem, NullCallbacks};

// Video system
pub use crate::core::video::{
    DisplayFlags, VideoBackend, VideoError, VideoState, VideoSystem, WindowId,
};

// Audio system
pub use crate::core::audio::{AudioBackend, AudioError, AudioSystem};
