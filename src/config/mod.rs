//! Service base configuration
//!
//! The badge and explorer roots are externally supplied constants, never
//! computed here. Resolution order: built-in defaults, then the config
//! file, then `BADGESMITH_*` environment variables; CLI flags override
//! last (applied in main).

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::ServiceBases;
use crate::infrastructure::CHAINLIST_URL;

const DEFAULT_BADGE_BASE: &str = "http://localhost:8080/badge";
const DEFAULT_EXPLORER_BASE: &str = "http://localhost:8080/scanner";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_badge_base")]
    pub badge_base_url: String,

    #[serde(default = "default_explorer_base")]
    pub explorer_base_url: String,

    #[serde(default = "default_chainlist_url")]
    pub chainlist_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            badge_base_url: default_badge_base(),
            explorer_base_url: default_explorer_base(),
            chainlist_url: default_chainlist_url(),
        }
    }
}

fn default_badge_base() -> String {
    DEFAULT_BADGE_BASE.to_string()
}

fn default_explorer_base() -> String {
    DEFAULT_EXPLORER_BASE.to_string()
}

fn default_chainlist_url() -> String {
    CHAINLIST_URL.to_string()
}

impl Config {
    pub fn service_bases(&self) -> ServiceBases {
        ServiceBases {
            badge: trim_base(&self.badge_base_url),
            explorer: trim_base(&self.explorer_base_url),
        }
    }
}

pub fn load() -> Config {
    let mut config = load_file().unwrap_or_default();
    apply_env(&mut config);
    config
}

fn load_file() -> Option<Config> {
    let path = config_path()?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str::<Config>(&content).ok()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("BADGESMITH_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("badgesmith").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("badgesmith").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "badgesmith", "badgesmith")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn apply_env(config: &mut Config) {
    if let Some(value) = env_non_empty("BADGESMITH_BADGE_BASE") {
        config.badge_base_url = value;
    }
    if let Some(value) = env_non_empty("BADGESMITH_EXPLORER_BASE") {
        config.explorer_base_url = value;
    }
    if let Some(value) = env_non_empty("BADGESMITH_CHAINLIST_URL") {
        config.chainlist_url = value;
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

// Paths are joined onto the base with a `/`, so a trailing one would double.
fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
