//=========================================================================
// Keyname Lookup
//=========================================================================
//
// Names for synthesized (custom) key codes at and above the custom-key
// threshold. Keyboard codes below the threshold resolve through
// `KeyCode::name`; this table covers the joystick direction and button
// keys of the currently opened slots and is rebuilt whenever the
// joystick registry is (re)initialized.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{codes, Axis, AxisDirection, InputKey};

//=== Constants ===========================================================

/// Reported for custom codes with no table entry.
pub const UNKNOWN_CUSTOM_KEY: &str = "unknown custom key";

//=== CustomKeyTable ======================================================

/// Name table for synthesized joystick key codes.
pub struct CustomKeyTable {
    entries: Vec<(u16, String)>,
}

impl CustomKeyTable {
    /// Creates an empty table; nothing resolves until `rebuild`.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Regenerates names for every synthesizable key of `slot_count`
    /// opened slots.
    pub fn rebuild(&mut self, slot_count: usize) {
        self.entries.clear();

        for slot in 0..slot_count {
            let slot = slot as u8;
            let directions = [
                (Axis::Horizontal, AxisDirection::Negative, "left"),
                (Axis::Horizontal, AxisDirection::Positive, "right"),
                (Axis::Vertical, AxisDirection::Negative, "up"),
                (Axis::Vertical, AxisDirection::Positive, "down"),
            ];
            for (axis, direction, label) in directions {
                let key = InputKey::JoystickAxis { slot, axis, direction };
                self.entries.push((key.code(), format!("joy {} {}", slot + 1, label)));
            }

            for button in 0..codes::JOY_BUTTONS_PER_SLOT {
                let key = InputKey::JoystickButton { slot, button };
                self.entries
                    .push((key.code(), format!("joy {} button {}", slot + 1, button)));
            }
        }
    }

    /// Resolves a custom key code to its name, if the slot is opened.
    pub fn lookup(&self, code: u16) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_code, _)| *entry_code == code)
            .map(|(_, name)| name.as_str())
    }
}

impl Default for CustomKeyTable {
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

    #[test]
    fn empty_table_resolves_nothing() {
        let table = CustomKeyTable::new();
        assert!(table.lookup(codes::CUSTOM_KEY_BASE).is_none());
    }

    #[test]
    fn rebuild_names_axis_directions() {
        let mut table = CustomKeyTable::new();
        table.rebuild(1);

        assert_eq!(table.lookup(codes::CUSTOM_KEY_BASE), Some("joy 1 left"));
        assert_eq!(table.lookup(codes::CUSTOM_KEY_BASE + 1), Some("joy 1 right"));
        assert_eq!(table.lookup(codes::CUSTOM_KEY_BASE + 2), Some("joy 1 up"));
        assert_eq!(table.lookup(codes::CUSTOM_KEY_BASE + 3), Some("joy 1 down"));
    }

    #[test]
    fn rebuild_names_buttons() {
        let mut table = CustomKeyTable::new();
        table.rebuild(2);

        let code = InputKey::JoystickButton { slot: 1, button: 3 }.code();
        assert_eq!(table.lookup(code), Some("joy 2 button 3"));
    }

    #[test]
    fn codes_of_unopened_slots_stay_unknown() {
        let mut table = CustomKeyTable::new();
        table.rebuild(1);

        let other_slot = InputKey::JoystickButton { slot: 2, button: 0 }.code();
        assert!(table.lookup(other_slot).is_none());
    }

    #[test]
    fn rebuild_replaces_previous_entries() {
        let mut table = CustomKeyTable::new();
        table.rebuild(2);
        table.rebuild(1);

        let slot1 = InputKey::JoystickAxis {
            slot: 1,
            axis: Axis::Horizontal,
            direction: AxisDirection::Negative,
        };
        assert!(table.lookup(slot1.code()).is_none());
    }
}
