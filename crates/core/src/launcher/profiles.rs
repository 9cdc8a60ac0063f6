use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::CoreLog;
use crate::error::ProfileError;
use crate::profile::{model::ControllerSet, normalize::parse_profile};

pub const PROFILE_EXTENSION: &str = "gamecontroller.amgp";

/// `<launcher root>/Data/Controller Configs`
pub fn controller_configs_dir(launcher_root: &Path) -> PathBuf {
    launcher_root.join("Data").join("Controller Configs")
}

/// `<config dir>/<game id>.gamecontroller.amgp` (does not check that it exists).
pub fn profile_path(config_dir: &Path, game_id: &str) -> PathBuf {
    config_dir.join(format!("{game_id}.{PROFILE_EXTENSION}"))
}

/// Read and normalize one profile. A missing file is `ProfileError::NotFound`.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than failing the read.
pub fn read_profile(path: &Path, logger: &Arc<dyn CoreLog>) -> Result<ControllerSet, ProfileError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ProfileError::NotFound(path.to_path_buf()),
        _ => ProfileError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let content = String::from_utf8_lossy(&bytes);
    if matches!(content, Cow::Owned(_)) {
        logger.warn(&format!(
            "[read_profile] {} is not valid UTF-8; bad bytes replaced",
            path.display()
        ));
    }

    let text = content.strip_prefix('\u{feff}').unwrap_or(&content);
    logger.debug(&format!("[read_profile] {}", path.display()));
    parse_profile(text, logger)
}

/// A normalized mapping stored against a caller's record (e.g. a game entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerAttachment {
    pub game_id: String,
    pub config: ControllerSet,
}

impl ControllerAttachment {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("serialize ControllerAttachment: {e}"))
    }
}

/// Load the mapping for `game_id`, if it has one.
///
/// No profile on disk is `Ok(None)`; parse and schema failures are logged and returned.
pub fn load_attachment(
    config_dir: &Path,
    game_id: &str,
    logger: &Arc<dyn CoreLog>,
) -> Result<Option<ControllerAttachment>, ProfileError> {
    let path = profile_path(config_dir, game_id);
    match read_profile(&path, logger) {
        Ok(config) => Ok(Some(ControllerAttachment {
            game_id: game_id.to_string(),
            config,
        })),
        Err(e) if e.is_not_found() => {
            logger.debug(&format!("[load_attachment] no profile for {game_id}"));
            Ok(None)
        }
        Err(e) => {
            logger.error(&format!("[load_attachment] {game_id}: {e}"));
            Err(e)
        }
    }
}
