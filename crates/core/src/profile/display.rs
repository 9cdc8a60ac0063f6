//! Collapsed, human-readable view of a [`ControllerSet`].
//!
//! Sections come out in a fixed order: d-pad, buttons, left stick, right stick,
//! then one per trigger. The d-pad absorbs the left stick when both map to the same
//! outputs, and an all-mouse-movement stick collapses into a single row.

use core::fmt;
use serde::Serialize;

use crate::profile::{
    equivalence::{dpad_matches_left_stick, is_pure_mouse_movement},
    model::{ButtonMapping, ControllerSet, ControllerStick},
    outputs::format_mapped_name,
};

pub const DPAD_HEADER: &str = "Dpad";
pub const DPAD_LEFT_STICK_HEADER: &str = "Dpad / Left Stick";
pub const BUTTONS_HEADER: &str = "Buttons";
pub const ALL_DIRECTIONS: &str = "All Directions";
pub const MOUSE_MOVEMENT: &str = "Mouse Movement";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySection {
    pub header: String,
    pub rows: Vec<DisplayRow>,
}

impl fmt::Display for DisplaySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        for row in &self.rows {
            writeln!(f, "  {}: {}", row.input, row.output)?;
        }
        Ok(())
    }
}

impl DisplayRow {
    fn from_mapping(mapping: &ButtonMapping) -> Self {
        DisplayRow {
            input: display_name(mapping.canonical_name.as_deref(), mapping.index),
            output: format_mapped_name(&mapping.slot, mapping.action_name.as_deref()),
        }
    }
}

/// Canonical name, or `Unknown (<index>)` for identifiers outside the tables.
fn display_name(name: Option<&str>, index: u32) -> String {
    name.map_or_else(|| format!("Unknown ({index})"), str::to_string)
}

pub fn build_display(set: &ControllerSet) -> Vec<DisplaySection> {
    let mut out = Vec::new();
    let merged = dpad_matches_left_stick(set);

    if let Some(dpad) = &set.dpad {
        let header = if merged {
            DPAD_LEFT_STICK_HEADER
        } else {
            DPAD_HEADER
        };
        push_section(
            &mut out,
            header.to_string(),
            dpad.buttons.iter().map(DisplayRow::from_mapping).collect(),
        );
    }

    push_section(
        &mut out,
        BUTTONS_HEADER.to_string(),
        set.buttons.iter().map(DisplayRow::from_mapping).collect(),
    );

    if let Some(left) = set.left_stick().filter(|_| !merged) {
        push_stick(&mut out, left);
    }
    if let Some(right) = set.right_stick() {
        push_stick(&mut out, right);
    }

    for trigger in &set.triggers {
        push_section(
            &mut out,
            display_name(trigger.canonical_name.as_deref(), trigger.index),
            vec![DisplayRow::from_mapping(&trigger.button)],
        );
    }

    out
}

fn push_stick(out: &mut Vec<DisplaySection>, stick: &ControllerStick) {
    let rows = if is_pure_mouse_movement(stick) {
        vec![DisplayRow {
            input: ALL_DIRECTIONS.to_string(),
            output: MOUSE_MOVEMENT.to_string(),
        }]
    } else {
        stick.buttons.iter().map(DisplayRow::from_mapping).collect()
    };
    push_section(
        out,
        display_name(stick.canonical_name.as_deref(), stick.index),
        rows,
    );
}

#[inline]
fn push_section(out: &mut Vec<DisplaySection>, header: String, rows: Vec<DisplayRow>) {
    if !rows.is_empty() {
        out.push(DisplaySection { header, rows });
    }
}
