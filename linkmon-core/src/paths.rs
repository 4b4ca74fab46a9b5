//! Centralized path configuration for linkmon.
//!
//! All data paths should go through this module to ensure consistency
//! between daemon and CLI, whether running as user or system service.

use std::path::PathBuf;

/// Get the linkmon data directory.
///
/// Resolution order:
/// 1. `LINKMON_DATA_DIR` environment variable
/// 2. `/var/lib/linkmon` if it exists (system install)
/// 3. `~/.linkmon` for user-only installs
pub fn data_dir() -> PathBuf {
    // Check environment variable first
    if let Ok(dir) = std::env::var("LINKMON_DATA_DIR") {
        return PathBuf::from(dir);
    }

    // Check if system install exists
    let system_dir = PathBuf::from("/var/lib/linkmon");
    if system_dir.exists() {
        return system_dir;
    }

    // Fall back to user home directory
    dirs::home_dir().map(|h| h.join(".linkmon")).unwrap_or(system_dir)
}

/// Get the database path.
pub fn db_path() -> PathBuf {
    data_dir().join("linkmon.db")
}

/// Get the configuration directory.
pub fn config_dir() -> PathBuf {
    data_dir().join("config")
}
