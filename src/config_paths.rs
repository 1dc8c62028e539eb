//! Where quill keeps its files
//!
//! ```text
//! <config root>/quill/
//! ├── config.yaml          assistant settings (AssistConfig)
//! └── logs/
//!     └── quill.log.<date> debug log, one file per day
//! ```
//!
//! The config root is `$XDG_CONFIG_HOME` or `~/.config` on Unix/macOS and
//! `%APPDATA%` on Windows. A document opened on the command line is never
//! stored here.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "quill";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// Prefix of the daily rolling log files
pub const LOG_FILE_PREFIX: &str = "quill.log";

/// Root of quill's own files, if the platform has a config location
pub fn config_dir() -> Option<PathBuf> {
    platform_config_root().map(|root| root.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn platform_config_root() -> Option<PathBuf> {
    env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn platform_config_root() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// Default location of the assistant settings
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

/// Create the logs directory (and its parents) and return it
pub fn ensure_logs_dir() -> io::Result<PathBuf> {
    let logs = logs_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "no config directory for this platform")
    })?;
    create_dir(&logs)?;
    Ok(logs)
}

fn create_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).map_err(|e| {
        io::Error::new(e.kind(), format!("cannot create {}: {}", path.display(), e))
    })
}
