//! Configuration for MCI.
//!
//! Two layers live here:
//!
//! 1. [`load_and_apply`] reads the XDG `config.toml` and the project `.env` and applies them to
//!    the process environment with priority **existing env > .env > XDG**.
//! 2. [`Settings`] is the typed, immutable snapshot built once from the environment (or any
//!    [`SettingsSource`]) and passed explicitly to whatever needs it.
//!
//! With feature `tracing-init`, [`logging::init`] installs the shared tracing subscriber.

mod dotenv;
#[cfg(feature = "tracing-init")]
pub mod logging;
pub mod settings;
mod source;
pub mod summary;
mod xdg_toml;

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;

pub use settings::{keys, parse_cors_origins, Settings};
pub use source::{ProcessEnv, SettingsSource};
pub use summary::{SettingsSummary, SummarySection};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("invalid environment variable name: {0:?}")]
    InvalidKey(String),
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` (`[env]` table) and the project `.env`, then
/// sets environment variables only for keys that are **not** already set.
///
/// * `app_name`: e.g. `"mci"`, used for the XDG path.
/// * `override_dir`: if `Some`, read `.env` from this directory instead of the current one.
///
/// Returns the keys that were applied, sorted. A name that is empty or contains `=` or NUL, or a
/// value containing NUL, fails the whole load before anything is set.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Vec<String>, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;
    apply_layers(&dotenv_map, &xdg_map)
}

fn apply_layers(
    dotenv_map: &HashMap<String, String>,
    xdg_map: &HashMap<String, String>,
) -> Result<Vec<String>, LoadError> {
    let keys: BTreeSet<&String> = dotenv_map.keys().chain(xdg_map.keys()).collect();
    let mut pending = Vec::new();
    for key in keys {
        let Some(value) = dotenv_map.get(key).or_else(|| xdg_map.get(key)) else {
            continue;
        };
        check_entry(key, value)?;
        if std::env::var_os(key).is_none() {
            pending.push((key, value));
        }
    }
    let mut applied = Vec::with_capacity(pending.len());
    for (key, value) in pending {
        std::env::set_var(key, value);
        applied.push(key.clone());
    }
    Ok(applied)
}

/// `set_var` panics on these, so they are rejected up front.
fn check_entry(key: &str, value: &str) -> Result<(), LoadError> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(LoadError::InvalidKey(key.to_string()));
    }
    if value.contains('\0') {
        return Err(LoadError::InvalidValue {
            key: key.to_string(),
            value: value.escape_debug().to_string(),
        });
    }
    Ok(())
}

/// Serializes tests that touch the process environment.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
