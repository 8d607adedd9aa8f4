//=========================================================================
// Joystick Registry
//=========================================================================
//
// Fixed-capacity registry of opened joystick devices with per-slot axis
// debounce state.
//
// Architecture:
//   JoystickProvider (backend) → init() → slots → axis_transition()
//
// Device discovery and opening go through the `JoystickProvider` trait so
// the registry can be driven headless in tests. The number of opened
// slots is capped by the hard maximum and optionally lowered via the
// `LUCENT_MAX_JOY` environment variable.
//
// Axis debounce: each slot tracks two bitmasks, one bit per axis index —
// whether the axis is currently deflected past the deadzone, and which
// sign it last reported. Crossing out of the deadzone synthesizes a
// direction-key down; crossing back in synthesizes the matching key up.
// Repeated events on the same side of the threshold produce nothing.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::env;

//=== External Crates =====================================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::event::{Axis, AxisDirection, InputKey, JoystickId, KeyState};

//=== Constants ===========================================================

/// Hard cap on opened joysticks; the registry never exceeds this.
pub const MAX_JOYSTICKS: usize = 4;

/// Slots opened when no environment override is present.
pub const DEFAULT_JOYSTICK_CAP: usize = 2;

/// Environment variable overriding the joystick cap. Parsed as a
/// non-negative integer; malformed or negative values keep the default.
pub const MAX_JOY_ENV: &str = "LUCENT_MAX_JOY";

/// Full-scale axis magnitude; the deadzone fraction scales against this.
pub const AXIS_MAX: f32 = 32767.0;

//=== JoystickError =======================================================

/// Joystick backend failures. These never abort startup: the registry
/// logs and continues with whatever it could open.
#[derive(Debug)]
pub enum JoystickError {
    /// The joystick subsystem could not be brought up.
    SubsystemUnavailable(String),

    /// A specific device could not be opened.
    OpenFailed(String),
}

impl std::fmt::Display for JoystickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubsystemUnavailable(e) => write!(f, "joystick subsystem unavailable: {}", e),
            Self::OpenFailed(e) => write!(f, "couldn't open joystick: {}", e),
        }
    }
}

impl std::error::Error for JoystickError {}

//=== JoystickProvider ====================================================

/// A connected device as reported by the provider, before opening.
#[derive(Debug, Clone)]
pub struct JoystickDevice {
    pub id: JoystickId,
    pub name: String,
}

/// Backend seam for joystick discovery and opening.
///
/// The embedding engine supplies the real implementation; tests use a
/// scripted one.
pub trait JoystickProvider {
    /// Lists connected devices, in open order.
    fn available_devices(&mut self) -> Result<Vec<JoystickDevice>, JoystickError>;

    /// Opens a device, returning its instance id.
    fn open(&mut self, device: &JoystickDevice) -> Result<JoystickId, JoystickError>;
}

//=== Slot ================================================================

/// One opened joystick: its backend instance id plus axis debounce state.
struct Slot {
    instance_id: JoystickId,

    /// Bit per axis: deflected past the deadzone.
    axis_active: u32,

    /// Bit per axis: sign of the last deflection (set = positive).
    axis_last_sign: u32,
}

impl Slot {
    fn new(instance_id: JoystickId) -> Self {
        Self {
            instance_id,
            axis_active: 0,
            axis_last_sign: 0,
        }
    }
}

//=== Cap Parsing =========================================================

/// Resolves the joystick cap from an environment override.
///
/// `None` and unparseable or negative values keep the default; anything
/// above the hard cap clamps to it.
pub fn parse_joystick_cap(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_JOYSTICK_CAP;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 0 => (n as usize).min(MAX_JOYSTICKS),
        Ok(_) => {
            warn!(target: "input", "{}: negative value {:?} ignored", MAX_JOY_ENV, raw);
            DEFAULT_JOYSTICK_CAP
        }
        Err(_) => {
            warn!(target: "input", "{}: malformed value {:?} ignored", MAX_JOY_ENV, raw);
            DEFAULT_JOYSTICK_CAP
        }
    }
}

//=== JoystickRegistry ====================================================

/// Fixed-capacity list of opened joysticks with per-slot debounce state.
pub struct JoystickRegistry {
    slots: Vec<Slot>,
    deadzone: f32,
}

impl JoystickRegistry {
    /// Creates an empty registry. No devices are opened until
    /// [`JoystickRegistry::init`].
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            deadzone: 0.0,
        }
    }

    //--- Initialization ---------------------------------------------------

    /// Opens devices from the provider, honoring the `LUCENT_MAX_JOY`
    /// override. Returns the number of opened slots.
    pub fn init<P: JoystickProvider>(&mut self, provider: &mut P) -> usize {
        let cap = parse_joystick_cap(env::var(MAX_JOY_ENV).ok().as_deref());
        self.init_with_cap(provider, cap)
    }

    /// Like [`JoystickRegistry::init`] with an explicit cap (still
    /// clamped to the hard maximum).
    pub fn init_with_cap<P: JoystickProvider>(&mut self, provider: &mut P, cap: usize) -> usize {
        self.slots.clear();

        let devices = match provider.available_devices() {
            Ok(devices) => devices,
            Err(e) => {
                warn!(target: "input", "{}", e);
                return 0;
            }
        };

        for device in devices.iter().take(cap.min(MAX_JOYSTICKS)) {
            match provider.open(device) {
                Ok(instance_id) => self.slots.push(Slot::new(instance_id)),
                Err(e) => warn!(target: "input", "{} ({})", e, device.name),
            }
        }

        info!(target: "input", "{} joystick(s) opened", self.slots.len());
        self.slots.len()
    }

    //--- Queries ----------------------------------------------------------

    /// Number of opened slots.
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Registry slot index for a backend instance id, if opened.
    pub fn slot_of(&self, id: JoystickId) -> Option<usize> {
        self.slots.iter().position(|s| s.instance_id == id)
    }

    /// Current deadzone threshold as a fraction of full axis deflection.
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    //--- Configuration ----------------------------------------------------

    /// Sets the deadzone threshold as a fraction of full deflection.
    pub fn set_deadzone(&mut self, fraction: f32) {
        self.deadzone = fraction;
    }

    //--- Axis Debounce ----------------------------------------------------

    /// Feeds one axis reading into the slot's debounce state.
    ///
    /// Returns `Some((key, state))` when the reading crosses the deadzone
    /// threshold: key down when leaving the deadzone, key up (for the
    /// direction entered earlier) when returning to it. Readings on the
    /// same side of the threshold as the previous one return `None`.
    pub(crate) fn axis_transition(
        &mut self,
        slot_index: usize,
        axis: u8,
        value: i16,
    ) -> Option<(InputKey, KeyState)> {
        let threshold = self.deadzone * AXIS_MAX;
        let slot = self.slots.get_mut(slot_index)?;
        let bit = 1u32.checked_shl(u32::from(axis))?;

        let logical_axis = if axis == 1 { Axis::Vertical } else { Axis::Horizontal };
        let inside_deadzone = f32::from(value).abs() <= threshold;

        if inside_deadzone {
            if slot.axis_active & bit == 0 {
                return None;
            }
            slot.axis_active &= !bit;
            let direction = if slot.axis_last_sign & bit != 0 {
                AxisDirection::Positive
            } else {
                AxisDirection::Negative
            };
            let key = InputKey::JoystickAxis {
                slot: slot_index as u8,
                axis: logical_axis,
                direction,
            };
            Some((key, KeyState::Up))
        } else {
            if slot.axis_active & bit != 0 {
                return None;
            }
            slot.axis_active |= bit;
            let direction = if value > 0 {
                slot.axis_last_sign |= bit;
                AxisDirection::Positive
            } else {
                slot.axis_last_sign &= !bit;
                AxisDirection::Negative
            };
            let key = InputKey::JoystickAxis {
                slot: slot_index as u8,
                axis: logical_axis,
                direction,
            };
            Some((key, KeyState::Down))
        }
    }
}

impl Default for JoystickRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
