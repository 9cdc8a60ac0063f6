//! Human-readable text for output slots.

use core::fmt;

use crate::profile::model::{OutputMode, Slot};

/// Readable output plus the optional user label it was bound under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedName {
    pub output: String,
    pub label: Option<String>,
}

impl fmt::Display for MappedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label} - ({})", self.output),
            None => f.write_str(&self.output),
        }
    }
}

/// Resolve a slot into readable output. Never fails: unknown pairs fall back to
/// `Unknown (<mode> - <code>)`.
pub fn mapped_name(slot: &Slot, label: Option<&str>) -> MappedName {
    MappedName {
        output: readable_output(slot),
        label: label.map(str::to_string),
    }
}

/// `"<label> - (<output>)"` when labelled, bare output otherwise.
#[inline]
pub fn format_mapped_name(slot: &Slot, label: Option<&str>) -> String {
    mapped_name(slot, label).to_string()
}

fn readable_output(slot: &Slot) -> String {
    // Qt key codes for A..Z are their ASCII values.
    if slot.mode == OutputMode::Keyboard && (65..=90).contains(&slot.code) {
        if let Some(c) = char::from_u32(slot.code) {
            return c.to_string();
        }
    }

    match table_entry(&slot.mode, slot.code) {
        Some(text) => text.to_string(),
        None => format!("Unknown ({} - {})", slot.mode, slot.code),
    }
}

fn table_entry(mode: &OutputMode, code: u32) -> Option<&'static str> {
    let text = match mode {
        OutputMode::MouseMovement => match code {
            1 => "Up",
            2 => "Down",
            3 => "Left",
            4 => "Right",
            _ => return None,
        },
        OutputMode::MouseButton => match code {
            1 => "Left Mouse Button",
            2 => "Middle Mouse Button",
            3 => "Right Mouse Button",
            4 => "Mouse Wheel Up",
            5 => "Mouse Wheel Down",
            _ => return None,
        },
        // Qt::Key values for the named special keys.
        OutputMode::Keyboard => match code {
            0x20 => "Space",
            0x0100_0000 => "Escape",
            0x0100_0001 => "Tab",
            0x0100_0003 => "Backspace",
            0x0100_0004 => "Enter",
            0x0100_0007 => "Delete",
            0x0100_0012 => "Arrow Left",
            0x0100_0013 => "Arrow Up",
            0x0100_0014 => "Arrow Right",
            0x0100_0015 => "Arrow Down",
            0x0100_0020 => "Shift",
            0x0100_0021 => "Control",
            0x0100_0023 => "Alt",
            _ => return None,
        },
        OutputMode::Other(_) => return None,
    };
    Some(text)
}
