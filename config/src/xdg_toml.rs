//! `[env]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// `<config_home>/<app_name>/config.toml`.
pub fn config_path(config_home: &Path, app_name: &str) -> PathBuf {
    config_home.join(app_name).join("config.toml")
}

/// Reads the `[env]` table under an explicit config home. Missing file or section is an empty map.
pub fn load_env_map_from(
    config_home: &Path,
    app_name: &str,
) -> Result<HashMap<String, String>, LoadError> {
    let path = config_path(config_home, app_name);
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file.env)
}

/// Same as [`load_env_map_from`] with the platform config home (`$XDG_CONFIG_HOME` or `~/.config`).
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let home = dirs::config_dir()
        .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".to_string()))?;
    load_env_map_from(&home, app_name)
}
