//! Platform directory defaults.

use std::path::PathBuf;

/// Default data directory.
///
/// Uses the platform data directory (`$XDG_DATA_HOME/tabpage` on Linux) and
/// falls back to `./data` when no home directory can be determined.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "tabpage", "tabpage")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Directory for the default log file: platform state dir, else local data dir.
pub fn default_log_dir() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "tabpage", "tabpage")?;
    Some(
        dirs.state_dir()
            .unwrap_or_else(|| dirs.data_local_dir())
            .to_path_buf(),
    )
}
