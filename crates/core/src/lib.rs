//! Core library for reading AntiMicroX controller profiles (`.gamecontroller.amgp`).
//!
//! This crate is UI-agnostic and host-agnostic. It exposes:
//! - `profile`: decode profile XML, normalize it into a `ControllerSet`, format outputs,
//!   detect equivalent mappings and build a collapsed display tree.
//! - `launcher`: profile file locations, record attachment and the controller session
//!   messages exchanged with whoever runs the remapper process.
//! - `core_log::CoreLog`: thin logging trait the host (CLI/launcher) can implement.
//!
//! Import the `prelude` if you want the most common types in scope.

pub mod core_log;
pub mod error;

pub mod launcher;
pub mod profile;

/// Convenient re-exports for downstream users (CLI/tests).
pub use core_log::CoreLog;
pub use error::ProfileError;

pub mod prelude {
    pub use crate::core_log::{CoreLog, NoopLog};
    pub use crate::error::ProfileError;

    // Profile model + pipeline
    pub use crate::profile::display::{DisplayRow, DisplaySection, build_display};
    pub use crate::profile::equivalence::{dpad_matches_left_stick, is_pure_mouse_movement};
    pub use crate::profile::inputs::InputTable;
    pub use crate::profile::model::{
        ButtonMapping, ControllerDpad, ControllerSet, ControllerStick, ControllerTrigger,
        OutputMode, Slot,
    };
    pub use crate::profile::names::{ActionNames, NameCategory};
    pub use crate::profile::normalize::parse_profile;
    pub use crate::profile::outputs::{MappedName, format_mapped_name, mapped_name};
    pub use crate::profile::raw_tree::{RawRecord, RawValue, as_list, decode};

    // Files + session boundary
    pub use crate::launcher::adapter::{SessionAdapter, SessionHandle};
    pub use crate::launcher::profiles::{
        ControllerAttachment, controller_configs_dir, load_attachment, profile_path, read_profile,
    };
    pub use crate::launcher::session::{
        ControllerSession, FsLocator, KILL_SETTLE_DELAY, LaunchSpec, LauncherRequest, LifecycleEvent,
        ProfileLocator, REMAPPER_EXECUTABLE,
    };
}
