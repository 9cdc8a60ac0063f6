use core::fmt;
use serde::{Deserialize, Serialize};

use crate::profile::inputs::{LEFT_STICK_INDEX, RIGHT_STICK_INDEX};

/// Output category a slot code is interpreted under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputMode {
    Keyboard,
    MouseButton,
    MouseMovement,
    /// Any mode we don't have a readable table for; kept verbatim.
    Other(String),
}

impl OutputMode {
    pub fn as_str(&self) -> &str {
        match self {
            OutputMode::Keyboard => "keyboard",
            OutputMode::MouseButton => "mousebutton",
            OutputMode::MouseMovement => "mousemovement",
            OutputMode::Other(s) => s,
        }
    }
}

impl From<&str> for OutputMode {
    fn from(s: &str) -> Self {
        match s {
            "keyboard" => OutputMode::Keyboard,
            "mousebutton" => OutputMode::MouseButton,
            "mousemovement" => OutputMode::MouseMovement,
            other => OutputMode::Other(other.to_string()),
        }
    }
}

impl From<String> for OutputMode {
    fn from(s: String) -> Self {
        OutputMode::from(s.as_str())
    }
}

impl From<OutputMode> for String {
    fn from(m: OutputMode) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output action: a keyboard/mouse code under a mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub code: u32,
    pub mode: OutputMode,
}

impl Slot {
    #[inline]
    pub fn new(code: u32, mode: impl Into<OutputMode>) -> Self {
        Slot {
            code,
            mode: mode.into(),
        }
    }
}

/// One physical input bound to exactly one output slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonMapping {
    /// Table-derived label (`None` for identifiers outside the table).
    pub canonical_name: Option<String>,
    /// User label from the profile's `<names>` block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
    pub slot: Slot,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerStick {
    pub canonical_name: Option<String>,
    pub buttons: Vec<ButtonMapping>,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerDpad {
    /// Directional buttons keyed by bit value (at most four).
    pub buttons: Vec<ButtonMapping>,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerTrigger {
    pub canonical_name: Option<String>,
    pub button: ButtonMapping,
    pub index: u32,
}

/// Normalized mapping for one profile. Built once per read, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerSet {
    pub sticks: Vec<ControllerStick>,
    pub triggers: Vec<ControllerTrigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpad: Option<ControllerDpad>,
    pub buttons: Vec<ButtonMapping>,
}

impl ControllerSet {
    #[inline]
    pub fn stick(&self, index: u32) -> Option<&ControllerStick> {
        self.sticks.iter().find(|s| s.index == index)
    }

    #[inline]
    pub fn left_stick(&self) -> Option<&ControllerStick> {
        self.stick(LEFT_STICK_INDEX)
    }

    #[inline]
    pub fn right_stick(&self) -> Option<&ControllerStick> {
        self.stick(RIGHT_STICK_INDEX)
    }

    /// True if no category carries a mapping.
    pub fn is_empty(&self) -> bool {
        self.sticks.is_empty()
            && self.triggers.is_empty()
            && self.dpad.is_none()
            && self.buttons.is_empty()
    }

    /// Every mapping in the set: d-pad, buttons, sticks, then triggers.
    pub fn mappings(&self) -> impl Iterator<Item = &ButtonMapping> {
        self.dpad
            .iter()
            .flat_map(|d| d.buttons.iter())
            .chain(self.buttons.iter())
            .chain(self.sticks.iter().flat_map(|s| s.buttons.iter()))
            .chain(self.triggers.iter().map(|t| &t.button))
    }
}
