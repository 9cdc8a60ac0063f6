//! Canonical names for physical inputs, keyed by category and numeric identifier.
//!
//! Every table is closed: identifiers outside it yield `None`, never an error.

pub const LEFT_STICK_INDEX: u32 = 1;
pub const RIGHT_STICK_INDEX: u32 = 2;

/// The names block addresses every d-pad label under this d-pad index.
pub const DPAD_NAMES_INDEX: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTable {
    Stick,
    StickButton,
    Trigger,
    TriggerButton,
    DpadButton,
    Button,
}

impl InputTable {
    pub fn name(self, index: u32) -> Option<&'static str> {
        use InputTable::*;
        let name = match (self, index) {
            (Stick, LEFT_STICK_INDEX) => "Left Stick",
            (Stick, RIGHT_STICK_INDEX) => "Right Stick",

            // Cardinal directions only; the even indices are diagonals.
            (StickButton, 1) => "Up",
            (StickButton, 3) => "Right",
            (StickButton, 5) => "Down",
            (StickButton, 7) => "Left",

            (Trigger, 5) => "Left Trigger",
            (Trigger, 6) => "Right Trigger",

            (TriggerButton, 2) => "Trigger Pull",

            // Bitmask values.
            (DpadButton, 1) => "Up",
            (DpadButton, 2) => "Right",
            (DpadButton, 4) => "Down",
            (DpadButton, 8) => "Left",

            (Button, 1) => "A",
            (Button, 2) => "B",
            (Button, 3) => "X",
            (Button, 4) => "Y",
            (Button, 5) => "Select",
            // 6 is left unnamed.
            (Button, 7) => "Start",

            _ => return None,
        };
        Some(name)
    }

    #[inline]
    pub fn owned_name(self, index: u32) -> Option<String> {
        self.name(index).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifiers_resolve() {
        assert_eq!(InputTable::Stick.name(1), Some("Left Stick"));
        assert_eq!(InputTable::StickButton.name(7), Some("Left"));
        assert_eq!(InputTable::Trigger.name(6), Some("Right Trigger"));
        assert_eq!(InputTable::TriggerButton.name(2), Some("Trigger Pull"));
        assert_eq!(InputTable::DpadButton.name(4), Some("Down"));
        assert_eq!(InputTable::Button.name(7), Some("Start"));
    }

    #[test]
    fn unknown_identifiers_are_absent() {
        assert_eq!(InputTable::Stick.name(3), None);
        assert_eq!(InputTable::StickButton.name(2), None);
        assert_eq!(InputTable::DpadButton.name(3), None);
        assert_eq!(InputTable::TriggerButton.name(1), None);
        assert_eq!(InputTable::Button.name(6), None);
        assert_eq!(InputTable::Button.name(0), None);
    }
}
