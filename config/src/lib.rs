//! Environment loading for mvtgen.
//!
//! Values come from three places, applied to the process environment with priority
//! **existing env > project `.env` > `$XDG_CONFIG_HOME/<app>/config.toml` `[env]` table**.
//! After [`load_and_apply`] runs, every crate reads its settings with plain
//! `std::env::var` through [`env_or`] / [`env_opt`].

mod dotenv;
mod xdg_toml;

use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

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
}

/// Loads `.env` and XDG `config.toml`, then sets only the keys that are **not** already
/// present in the process environment.
///
/// * `app_name`: e.g. `"mvtgen"`; XDG path is `~/.config/<app_name>/config.toml`.
/// * `override_dir`: look for `.env` here instead of the current directory.
///
/// Returns the number of variables that were set.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<usize, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let mut keys: std::collections::BTreeSet<&String> = xdg_map.keys().collect();
    keys.extend(dotenv_map.keys());

    let mut applied = 0;
    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(v) = dotenv_map.get(key).or_else(|| xdg_map.get(key)) {
            std::env::set_var(key, v);
            applied += 1;
        }
    }
    tracing::debug!(app = app_name, applied, "environment loaded");
    Ok(applied)
}

/// Reads `key` and parses it, falling back to `default` when unset, empty or unparseable.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Reads `key`, treating an empty or whitespace-only value as unset.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
