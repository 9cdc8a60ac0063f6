//! Normalize a decoded profile tree into a [`ControllerSet`].
//!
//! Missing categories are normal (most profiles omit some). Entries we can't use
//! (no numeric `index`, no usable slot) are skipped with a warning; they never fail
//! the parse. Only a missing root or binding set is a schema error.

use std::sync::Arc;

use crate::core_log::CoreLog;
use crate::error::ProfileError;
use crate::profile::{
    inputs::{DPAD_NAMES_INDEX, InputTable},
    model::{
        ButtonMapping, ControllerDpad, ControllerSet, ControllerStick, ControllerTrigger, Slot,
    },
    names::{ActionNames, NameCategory},
    raw_tree::{RawRecord, RawValue, decode},
};

pub const ROOT_ELEMENT: &str = "gamecontroller";

/// Decode profile markup and normalize it.
pub fn parse_profile(text: &str, logger: &Arc<dyn CoreLog>) -> Result<ControllerSet, ProfileError> {
    let tree = decode(text)?;
    ControllerSet::from_tree(&tree, logger)
}

impl ControllerSet {
    /// Build the model from a decoded tree whose top-level field is `<gamecontroller>`.
    pub fn from_tree(tree: &RawRecord, logger: &Arc<dyn CoreLog>) -> Result<Self, ProfileError> {
        let controller = tree
            .field(ROOT_ELEMENT)
            .and_then(RawValue::as_record)
            .ok_or_else(|| ProfileError::MalformedSchema(format!("missing <{ROOT_ELEMENT}> root")))?;

        let sets = controller
            .field("sets")
            .ok_or_else(|| ProfileError::MalformedSchema("missing <sets> container".into()))?;
        let set_entries = sets.as_record().map(|r| r.list("set")).unwrap_or(&[]);
        let Some(first_set) = set_entries.first() else {
            return Err(ProfileError::MalformedSchema(
                "missing <set> binding set".into(),
            ));
        };
        if set_entries.len() > 1 {
            logger.debug(&format!(
                "[from_tree] {} binding sets; using the first",
                set_entries.len()
            ));
        }

        let Some(set) = first_set.as_record() else {
            logger.debug("[from_tree] binding set is empty");
            return Ok(ControllerSet::default());
        };

        let names = ActionNames::new(controller.field("names").and_then(RawValue::as_record));
        let normalizer = Normalizer { names, logger };

        let out = ControllerSet {
            sticks: normalizer.sticks(set),
            triggers: normalizer.triggers(set),
            dpad: normalizer.dpad(set),
            buttons: normalizer.buttons(set),
        };

        logger.info(&format!(
            "[from_tree] Loaded {} sticks, {} triggers, {} dpad buttons, {} buttons",
            out.sticks.len(),
            out.triggers.len(),
            out.dpad.as_ref().map_or(0, |d| d.buttons.len()),
            out.buttons.len()
        ));

        Ok(out)
    }
}

struct Normalizer<'a> {
    names: ActionNames<'a>,
    logger: &'a Arc<dyn CoreLog>,
}

impl Normalizer<'_> {
    fn sticks(&self, set: &RawRecord) -> Vec<ControllerStick> {
        let mut out = Vec::new();
        for stick in records(set, "stick") {
            let Some(index) = self.index_of(stick, "stick") else {
                continue;
            };

            let buttons = records(stick, "stickbutton")
                .filter_map(|button| {
                    let (button_index, slot) = self.binding(button, "stickbutton")?;
                    Some(ButtonMapping {
                        canonical_name: InputTable::StickButton.owned_name(button_index),
                        action_name: self.names.resolve(
                            NameCategory::Stick,
                            index,
                            Some(button_index),
                        ),
                        slot,
                        index: button_index,
                    })
                })
                .collect();

            out.push(ControllerStick {
                canonical_name: InputTable::Stick.owned_name(index),
                buttons,
                index,
            });
        }
        out
    }

    fn triggers(&self, set: &RawRecord) -> Vec<ControllerTrigger> {
        let mut out = Vec::new();
        for trigger in records(set, "trigger") {
            let Some(index) = self.index_of(trigger, "trigger") else {
                continue;
            };

            let Some((button_index, slot)) = records(trigger, "triggerbutton")
                .next()
                .and_then(|button| self.binding(button, "triggerbutton"))
            else {
                self.logger
                    .warn(&format!("[triggers] trigger {index} has no usable button; skipped"));
                continue;
            };

            out.push(ControllerTrigger {
                canonical_name: InputTable::Trigger.owned_name(index),
                button: ButtonMapping {
                    canonical_name: InputTable::TriggerButton.owned_name(button_index),
                    action_name: self.names.resolve(NameCategory::Axis, index, None),
                    slot,
                    index: button_index,
                },
                index,
            });
        }
        out
    }

    fn dpad(&self, set: &RawRecord) -> Option<ControllerDpad> {
        let mut dpads = records(set, "dpad");
        let dpad = dpads.next()?;
        if dpads.next().is_some() {
            self.logger.debug("[dpad] more than one <dpad>; using the first");
        }

        let buttons = records(dpad, "dpadbutton")
            .filter_map(|button| {
                let (bit, slot) = self.binding(button, "dpadbutton")?;
                Some(ButtonMapping {
                    canonical_name: InputTable::DpadButton.owned_name(bit),
                    action_name: self
                        .names
                        .resolve(NameCategory::Dpad, DPAD_NAMES_INDEX, Some(bit)),
                    slot,
                    index: bit,
                })
            })
            .collect();

        Some(ControllerDpad {
            buttons,
            index: dpad.numeric_attribute("index").unwrap_or(DPAD_NAMES_INDEX),
        })
    }

    fn buttons(&self, set: &RawRecord) -> Vec<ButtonMapping> {
        records(set, "button")
            .filter_map(|button| {
                let (index, slot) = self.binding(button, "button")?;
                Some(ButtonMapping {
                    canonical_name: InputTable::Button.owned_name(index),
                    action_name: self.names.resolve(NameCategory::Button, index, None),
                    slot,
                    index,
                })
            })
            .collect()
    }

    fn index_of(&self, entry: &RawRecord, element: &str) -> Option<u32> {
        let index = entry.numeric_attribute("index");
        if index.is_none() {
            self.logger.warn(&format!(
                "[normalize] <{element}> without a numeric index ({:?}); skipped",
                entry.attribute("index")
            ));
        }
        index
    }

    /// Index + first slot of a binding element, or `None` (logged) if either is unusable.
    fn binding(&self, entry: &RawRecord, element: &str) -> Option<(u32, Slot)> {
        let index = self.index_of(entry, element)?;
        match read_slot(entry) {
            Ok(slot) => Some((index, slot)),
            Err(why) => {
                self.logger
                    .warn(&format!("[normalize] <{element} index=\"{index}\">: {why}; skipped"));
                None
            }
        }
    }
}

/// Record-shaped children named `name`; bare text children carry nothing useful.
fn records<'a>(parent: &'a RawRecord, name: &str) -> impl Iterator<Item = &'a RawRecord> {
    parent.list(name).iter().filter_map(RawValue::as_record)
}

fn read_slot(entry: &RawRecord) -> Result<Slot, &'static str> {
    let slots = entry
        .field("slots")
        .and_then(RawValue::as_record)
        .ok_or("no <slots>")?;
    let slot = records(slots, "slot").next().ok_or("no <slot>")?;

    let code = slot
        .field("code")
        .and_then(RawValue::as_number)
        .ok_or("missing or non-numeric <code>")?;
    let mode = slot
        .field("mode")
        .and_then(RawValue::as_text)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or("missing <mode>")?;

    Ok(Slot::new(code, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_log::NoopLog;
    use crate::profile::model::OutputMode;

    fn log() -> Arc<dyn CoreLog> {
        Arc::new(NoopLog)
    }

    fn slot_xml(code: &str, mode: &str) -> String {
        format!("<slots><slot><code>{code}</code><mode>{mode}</mode></slot></slots>")
    }

    fn profile(set_body: &str, names: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<gamecontroller configversion="19" appversion="3.3.4">
    {names}
    <sets>
        <set index="1">{set_body}</set>
    </sets>
</gamecontroller>"#
        )
    }

    #[test]
    fn single_button_without_names() {
        let xml = profile(
            &format!(r#"<button index="1">{}</button>"#, slot_xml("0x20", "keyboard")),
            "",
        );
        let set = parse_profile(&xml, &log()).unwrap();

        assert_eq!(set.buttons.len(), 1);
        let b = &set.buttons[0];
        assert_eq!(b.canonical_name.as_deref(), Some("A"));
        assert_eq!(b.action_name, None);
        assert_eq!(b.slot, Slot::new(32, "keyboard"));
        assert!(set.sticks.is_empty());
        assert!(set.triggers.is_empty());
        assert!(set.dpad.is_none());
    }

    #[test]
    fn sticks_resolve_names_and_labels() {
        let body = format!(
            r#"<stick index="1">
                <stickbutton index="1">{}</stickbutton>
                <stickbutton index="3">{}</stickbutton>
                <stickbutton index="2">{}</stickbutton>
            </stick>"#,
            slot_xml("87", "keyboard"),
            slot_xml("68", "keyboard"),
            slot_xml("69", "keyboard"),
        );
        let names = r#"<names>
            <controlstickbuttonname index="1" button="3">Strafe Right</controlstickbuttonname>
        </names>"#;
        let set = parse_profile(&profile(&body, names), &log()).unwrap();

        let stick = set.left_stick().unwrap();
        assert_eq!(stick.canonical_name.as_deref(), Some("Left Stick"));
        let names: Vec<_> = stick.buttons.iter().map(|b| b.canonical_name.as_deref()).collect();
        assert_eq!(names, vec![Some("Up"), Some("Right"), None]);
        assert_eq!(stick.buttons[1].action_name.as_deref(), Some("Strafe Right"));
        assert_eq!(stick.buttons[0].action_name, None);
    }

    #[test]
    fn trigger_uses_axis_labels() {
        let body = format!(
            r#"<trigger index="6"><triggerbutton index="2">{}</triggerbutton></trigger>"#,
            slot_xml("1", "mousebutton")
        );
        let names = r#"<names><axisname index="6">Shoot</axisname></names>"#;
        let set = parse_profile(&profile(&body, names), &log()).unwrap();

        let trigger = &set.triggers[0];
        assert_eq!(trigger.canonical_name.as_deref(), Some("Right Trigger"));
        assert_eq!(trigger.button.canonical_name.as_deref(), Some("Trigger Pull"));
        assert_eq!(trigger.button.action_name.as_deref(), Some("Shoot"));
        assert_eq!(trigger.button.slot.mode, OutputMode::MouseButton);
    }

    #[test]
    fn dpad_labels_use_fixed_primary_index() {
        let body = format!(
            r#"<dpad index="1">
                <dpadbutton index="1">{}</dpadbutton>
                <dpadbutton index="8">{}</dpadbutton>
            </dpad>"#,
            slot_xml("16777235", "keyboard"),
            slot_xml("16777234", "keyboard"),
        );
        let names = r#"<names>
            <vdpadbutton index="1" button="8">Back</vdpadbutton>
            <vdpadbutton index="2" button="1">Wrong Pad</vdpadbutton>
        </names>"#;
        let set = parse_profile(&profile(&body, names), &log()).unwrap();

        let dpad = set.dpad.unwrap();
        assert_eq!(dpad.index, 1);
        assert_eq!(dpad.buttons[0].canonical_name.as_deref(), Some("Up"));
        assert_eq!(dpad.buttons[0].action_name, None);
        assert_eq!(dpad.buttons[1].canonical_name.as_deref(), Some("Left"));
        assert_eq!(dpad.buttons[1].action_name.as_deref(), Some("Back"));
    }

    #[test]
    fn unknown_identifiers_degrade_to_absent_names() {
        let body = format!(
            r#"<stick index="9"><stickbutton index="4">{s}</stickbutton></stick>
               <button index="6">{s}</button>
               <trigger index="3"><triggerbutton index="1">{s}</triggerbutton></trigger>"#,
            s = slot_xml("65", "keyboard")
        );
        let set = parse_profile(&profile(&body, ""), &log()).unwrap();

        assert_eq!(set.sticks[0].canonical_name, None);
        assert_eq!(set.sticks[0].buttons[0].canonical_name, None);
        assert_eq!(set.buttons[0].canonical_name, None);
        assert_eq!(set.triggers[0].canonical_name, None);
        assert_eq!(set.triggers[0].button.canonical_name, None);
    }

    #[test]
    fn unusable_entries_are_skipped() {
        let body = format!(
            r#"<button index="1"/>
               <button index="x">{s}</button>
               <button index="2"><slots><slot><code>abc</code><mode>keyboard</mode></slot></slots></button>
               <button index="3">{s}</button>"#,
            s = slot_xml("66", "keyboard")
        );
        let set = parse_profile(&profile(&body, ""), &log()).unwrap();

        assert_eq!(set.buttons.len(), 1);
        assert_eq!(set.buttons[0].index, 3);
    }

    #[test]
    fn first_slot_is_used() {
        let body = r#"<button index="2"><slots>
                <slot><code>1</code><mode>mousebutton</mode></slot>
                <slot><code>3</code><mode>mousebutton</mode></slot>
            </slots></button>"#;
        let set = parse_profile(&profile(body, ""), &log()).unwrap();
        assert_eq!(set.buttons[0].slot, Slot::new(1, "mousebutton"));
    }

    #[test]
    fn missing_binding_set_is_malformed_schema() {
        let no_sets = r#"<gamecontroller configversion="19"><names/></gamecontroller>"#;
        assert!(matches!(
            parse_profile(no_sets, &log()),
            Err(ProfileError::MalformedSchema(_))
        ));

        let empty_sets = r#"<gamecontroller><sets></sets></gamecontroller>"#;
        assert!(matches!(
            parse_profile(empty_sets, &log()),
            Err(ProfileError::MalformedSchema(_))
        ));

        let wrong_root = r#"<joystick><sets><set index="1"/></sets></joystick>"#;
        assert!(matches!(
            parse_profile(wrong_root, &log()),
            Err(ProfileError::MalformedSchema(_))
        ));
    }

    #[test]
    fn empty_set_yields_empty_model() {
        let xml = r#"<gamecontroller><sets><set index="1"/></sets></gamecontroller>"#;
        let set = parse_profile(xml, &log()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn first_of_several_sets_is_used() {
        let xml = format!(
            r#"<gamecontroller><sets>
                <set index="1"><button index="1">{}</button></set>
                <set index="2"><button index="2">{}</button></set>
            </sets></gamecontroller>"#,
            slot_xml("65", "keyboard"),
            slot_xml("66", "keyboard"),
        );
        let set = parse_profile(&xml, &log()).unwrap();
        assert_eq!(set.buttons.len(), 1);
        assert_eq!(set.buttons[0].index, 1);
    }

    #[test]
    fn broken_markup_is_a_parse_error() {
        assert!(matches!(
            parse_profile("<gamecontroller><sets>", &log()),
            Err(ProfileError::Parse(_))
        ));
    }
}
