//! Config file discovery and TOML loading.
//!
//! Flags and env vars are layered over whatever file is found here by the
//! binary; this module only decides which file that is.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// `--config` or the config env var
    Explicit(PathBuf),
    CurrentDir(PathBuf),
    XdgConfig(PathBuf),
    /// `/etc/climate-api/`
    System(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Defaults => None,
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(path) = self.path() else {
            return f.write_str("(defaults)");
        };
        write!(f, "{}", path.display())
    }
}

/// Every place a config file may live, highest priority first.
///
/// The env var entry is only present when the variable is set. Nothing here
/// touches the filesystem.
pub fn config_candidates(env_var: &str, filename: &str) -> Vec<ConfigSource> {
    let mut candidates = Vec::with_capacity(4);
    if let Ok(path) = env::var(env_var) {
        candidates.push(ConfigSource::Explicit(path.into()));
    }
    let xdg = xdg_home("XDG_CONFIG_HOME", ".config").join(filename);
    let system = Path::new("/etc").join(APP_NAME).join(filename);
    candidates.extend([
        ConfigSource::CurrentDir(filename.into()),
        ConfigSource::XdgConfig(xdg),
        ConfigSource::System(system),
    ]);
    candidates
}

/// First candidate from [`config_candidates`] that exists, or [`ConfigSource::Defaults`].
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    config_candidates(env_var, filename)
        .into_iter()
        .find(|source| source.path().is_some_and(|p| p.exists()))
        .unwrap_or(ConfigSource::Defaults)
}

/// `$<var>/climate-api`, else `~/<fallback>/climate-api`, else relative to the cwd.
fn xdg_home(var: &str, fallback: &str) -> PathBuf {
    let base = match (env::var_os(var), env::var_os("HOME")) {
        (Some(dir), _) => PathBuf::from(dir),
        (None, Some(home)) => Path::new(&home).join(fallback),
        (None, None) => PathBuf::from(fallback),
    };
    base.join(APP_NAME)
}

pub fn get_xdg_data_dir() -> PathBuf {
    xdg_home("XDG_DATA_HOME", ".local/share")
}

/// Parses the file behind `source`; [`ConfigSource::Defaults`] yields `T::default()`.
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    let Some(path) = source.path() else {
        return Ok(T::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
