//! Controller session messages.
//!
//! The host reports lifecycle events; [`ControllerSession`] answers with requests for
//! whoever owns the remapper process. Nothing here spawns or kills a process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::launcher::profiles::profile_path;

/// Remapper executable the launch requests are meant for.
pub const REMAPPER_EXECUTABLE: &str = "antimicrox.exe";

/// How long the executor should wait after a kill before launching again.
pub const KILL_SETTLE_DELAY: Duration = Duration::from_millis(500);

const GAME_SERVICE_PREFIX: &str = "game.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    GameLaunched { game_id: String },
    /// A host service went away; game services are named `game.<id>`.
    ServiceRemoved { service_id: String },
    EditRequested { game_id: String },
    /// The user agreed to create a profile after a `PromptCreate`.
    CreateConfirmed { game_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherRequest {
    Kill,
    Launch(LaunchSpec),
    /// Ask the user whether to create a profile for a game without one.
    PromptCreate { game_id: String },
    /// Copy the default template to `profile`.
    SeedProfile { profile: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub profile: PathBuf,
    /// Hidden in the tray while a game runs; visible when editing.
    pub hidden: bool,
    /// Wait before starting; non-zero when the same batch killed a remapper.
    pub settle: Duration,
}

impl LaunchSpec {
    #[inline]
    pub fn program(&self) -> &'static str {
        REMAPPER_EXECUTABLE
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if self.hidden {
            args.push("--hidden".to_string());
            args.push("--tray".to_string());
        }
        args.push("--profile".to_string());
        args.push(self.profile.display().to_string());
        args
    }
}

/// Answers "does this profile file exist?" for the session.
pub trait ProfileLocator: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the real file system.
pub struct FsLocator;

impl ProfileLocator for FsLocator {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl<F> ProfileLocator for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn exists(&self, path: &Path) -> bool {
        self(path)
    }
}

#[derive(Debug, Clone)]
pub struct ControllerSession {
    config_dir: PathBuf,
    running: bool,
    last_game_id: Option<String>,
}

impl ControllerSession {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            running: false,
            last_game_id: None,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn last_game_id(&self) -> Option<&str> {
        self.last_game_id.as_deref()
    }

    pub fn handle(
        &mut self,
        event: &LifecycleEvent,
        locator: &dyn ProfileLocator,
    ) -> Vec<LauncherRequest> {
        let mut out = Vec::new();
        match event {
            LifecycleEvent::GameLaunched { game_id } => {
                self.kill_if_running(&mut out);
                let profile = profile_path(&self.config_dir, game_id);
                if locator.exists(&profile) {
                    self.last_game_id = Some(game_id.clone());
                    self.launch(&mut out, profile, true);
                }
            }
            LifecycleEvent::ServiceRemoved { service_id } => {
                let game_id = service_id
                    .strip_prefix(GAME_SERVICE_PREFIX)
                    .filter(|id| !id.is_empty());
                if game_id.is_some() && game_id == self.last_game_id.as_deref() {
                    self.kill_if_running(&mut out);
                }
            }
            LifecycleEvent::EditRequested { game_id } => {
                self.kill_if_running(&mut out);
                let profile = profile_path(&self.config_dir, game_id);
                if locator.exists(&profile) {
                    self.launch(&mut out, profile, false);
                } else {
                    out.push(LauncherRequest::PromptCreate {
                        game_id: game_id.clone(),
                    });
                }
            }
            LifecycleEvent::CreateConfirmed { game_id } => {
                self.kill_if_running(&mut out);
                let profile = profile_path(&self.config_dir, game_id);
                out.push(LauncherRequest::SeedProfile {
                    profile: profile.clone(),
                });
                self.launch(&mut out, profile, false);
            }
        }
        out
    }

    fn kill_if_running(&mut self, out: &mut Vec<LauncherRequest>) {
        if self.running {
            self.running = false;
            out.push(LauncherRequest::Kill);
        }
    }

    fn launch(&mut self, out: &mut Vec<LauncherRequest>, profile: PathBuf, hidden: bool) {
        let settle = if out.contains(&LauncherRequest::Kill) {
            KILL_SETTLE_DELAY
        } else {
            Duration::ZERO
        };
        self.running = true;
        out.push(LauncherRequest::Launch(LaunchSpec {
            profile,
            hidden,
            settle,
        }));
    }
}
