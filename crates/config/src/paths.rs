//! Path utilities

use std::path::PathBuf;

/// Data directory (~/.reagent)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .expect("failed to locate home directory")
        .join(".reagent")
}

/// Config file location
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}
