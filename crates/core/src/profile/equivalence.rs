//! Mapping equivalences used to collapse the display.

use crate::profile::model::{ControllerSet, ControllerStick, OutputMode};

/// True when a d-pad and a left stick both exist and every d-pad direction has a
/// left-stick button with the same canonical name and an identical slot.
///
/// An empty d-pad does not count as matching.
pub fn dpad_matches_left_stick(set: &ControllerSet) -> bool {
    let (Some(dpad), Some(left)) = (set.dpad.as_ref(), set.left_stick()) else {
        return false;
    };
    if dpad.buttons.is_empty() {
        return false;
    }

    dpad.buttons.iter().all(|button| {
        button.canonical_name.is_some()
            && left
                .buttons
                .iter()
                .find(|s| s.canonical_name == button.canonical_name)
                .is_some_and(|s| s.slot == button.slot)
    })
}

/// True when the stick has buttons and all of them emit mouse movement.
pub fn is_pure_mouse_movement(stick: &ControllerStick) -> bool {
    !stick.buttons.is_empty()
        && stick
            .buttons
            .iter()
            .all(|b| b.slot.mode == OutputMode::MouseMovement)
}
