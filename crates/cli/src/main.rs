//! Show the controller mapping stored in an AntiMicroX profile.
//!
//! Examples:
//!   amgp-view --profile ".\\default.gamecontroller.amgp"
//!   amgp-view --root "C:\\Flashpoint" --game 0a1b2c3d-...
//!   amgp-view --profile ".\\x.gamecontroller.amgp" --json
//!
//! Notes:
//! - Either --profile, or both --root and --game, are required.
//! - A game without a profile is not an error: it just has no controller mapping.

use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use amgp_core::prelude::*;

// ───────────────────────────── CLI Args ─────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "amgp-view",
    version,
    about = "Show the controller mapping of an AntiMicroX profile"
)]
struct Args {
    /// Profile to read (a .gamecontroller.amgp file)
    #[arg(short, long, conflicts_with_all = ["root", "game"])]
    profile: Option<PathBuf>,

    /// Launcher root; profiles live under <root>/Data/Controller Configs
    #[arg(long, requires = "game")]
    root: Option<PathBuf>,

    /// Game id whose profile to show (used with --root)
    #[arg(long, requires = "root")]
    game: Option<String>,

    /// Print the normalized mapping as JSON instead of the display view
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

// ───────────────────────────── Logger ─────────────────────────────

#[derive(Clone)]
struct StderrLogger {
    verbose: bool,
}

impl CoreLog for StderrLogger {
    fn info(&self, msg: &str) {
        if self.verbose {
            eprintln!("INFO:  {msg}");
        }
    }
    fn warn(&self, msg: &str) {
        eprintln!("WARN:  {msg}");
    }
    fn error(&self, msg: &str) {
        eprintln!("ERROR: {msg}");
    }
    fn debug(&self, msg: &str) {
        if self.verbose {
            eprintln!("DEBUG: {msg}");
        }
    }
}

// ───────────────────────────── main ─────────────────────────────

fn main() -> Result<(), String> {
    let args = Args::parse();

    let core_log: Arc<dyn CoreLog> = Arc::new(StderrLogger {
        verbose: args.verbose,
    });

    let path = match (&args.profile, &args.root, &args.game) {
        (Some(p), _, _) => p.clone(),
        (None, Some(root), Some(game)) => profile_path(&controller_configs_dir(root), game),
        _ => return Err("pass --profile, or --root together with --game".into()),
    };
    core_log.debug(&format!("Profile: {}", path.display()));

    let config = match read_profile(&path, &core_log) {
        Ok(c) => c,
        Err(e) if e.is_not_found() => {
            println!("No controller mapping ({} does not exist)", path.display());
            return Ok(());
        }
        Err(e) => return Err(e.to_string()),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| format!("serialize mapping: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let sections = build_display(&config);
    if sections.is_empty() {
        println!("Profile has no mapped inputs");
        return Ok(());
    }
    for section in sections {
        println!("{section}");
    }
    Ok(())
}
