//! Standard paths used by consult-user-dialog

use std::path::PathBuf;

/// Directory name under the platform config and data dirs
pub const APP_DIR: &str = "consult-user-dialog";

/// Environment variable that points at an explicit config file
pub const CONFIG_ENV: &str = "CONSULT_DIALOG_CONFIG";

/// Standard paths
pub struct Paths {
    /// Data directory (~/.local/share/consult-user-dialog)
    pub data: PathBuf,
    /// Config directory (~/.config/consult-user-dialog)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join(APP_DIR);

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_DIR);

        Self { data, config }
    }

    /// Config file path, honouring `CONSULT_DIALOG_CONFIG`
    pub fn config_file(&self) -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => self.config.join("config.yaml"),
        }
    }

    /// Default top-level QML resource for the renderer
    pub fn ui_entry(&self) -> PathBuf {
        self.data.join("qml").join("Main.qml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_entry_under_data_dir() {
        let paths = Paths::new();
        let entry = paths.ui_entry();
        assert!(entry.starts_with(&paths.data));
        assert!(entry.ends_with("qml/Main.qml"));
    }

    #[test]
    fn test_dirs_are_app_scoped() {
        let paths = Paths::new();
        assert!(paths.data.ends_with(APP_DIR));
        assert!(paths.config.ends_with(APP_DIR));
    }
}
