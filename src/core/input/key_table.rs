//=========================================================================
// Key-State Table
//=========================================================================
//
// Bounded up/down table indexed by serialization key code.
//
// Owned by the event normalizer (not process-wide state), so tests can
// drive it in isolation. Codes at or above MAX_KEYS are never stored;
// reads outside the table report Up.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{codes::MAX_KEYS, KeyState};

//=== KeyStateTable =======================================================

/// Fixed-size table mapping key codes to up/down state.
pub struct KeyStateTable {
    states: [KeyState; MAX_KEYS],
}

impl KeyStateTable {
    /// Creates a table with every key up.
    pub fn new() -> Self {
        Self {
            states: [KeyState::Up; MAX_KEYS],
        }
    }

    /// Records the state of `code`. A no-op for codes outside the table.
    pub fn set(&mut self, code: u16, state: KeyState) {
        if let Some(slot) = self.states.get_mut(code as usize) {
            *slot = state;
        }
    }

    /// Returns the recorded state of `code`, or `Up` for codes outside
    /// the table.
    pub fn get(&self, code: u16) -> KeyState {
        self.states
            .get(code as usize)
            .copied()
            .unwrap_or(KeyState::Up)
    }

    /// Resets every key to up.
    pub fn reset(&mut self) {
        self.states = [KeyState::Up; MAX_KEYS];
    }
}

impl Default for KeyStateTable {
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
    fn starts_with_all_keys_up() {
        let table = KeyStateTable::new();
        assert_eq!(table.get(0), KeyState::Up);
        assert_eq!(table.get((MAX_KEYS - 1) as u16), KeyState::Up);
    }

    #[test]
    fn down_then_up_roundtrip() {
        let mut table = KeyStateTable::new();

        table.set(97, KeyState::Down);
        assert_eq!(table.get(97), KeyState::Down);

        table.set(97, KeyState::Up);
        assert_eq!(table.get(97), KeyState::Up);
    }

    #[test]
    fn codes_outside_table_are_never_stored() {
        let mut table = KeyStateTable::new();

        table.set(MAX_KEYS as u16, KeyState::Down);
        table.set(u16::MAX, KeyState::Down);

        assert_eq!(table.get(MAX_KEYS as u16), KeyState::Up);
        assert_eq!(table.get(u16::MAX), KeyState::Up);
    }

    #[test]
    fn last_valid_code_is_stored() {
        let mut table = KeyStateTable::new();
        let last = (MAX_KEYS - 1) as u16;

        table.set(last, KeyState::Down);
        assert_eq!(table.get(last), KeyState::Down);
    }

    #[test]
    fn reset_clears_all_state() {
        let mut table = KeyStateTable::new();
        table.set(10, KeyState::Down);
        table.set(500, KeyState::Down);

        table.reset();

        assert_eq!(table.get(10), KeyState::Up);
        assert_eq!(table.get(500), KeyState::Up);
    }
}
