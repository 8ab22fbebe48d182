use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::portfolio::DEFAULT_PROFIT_GOAL;

/// Environment variable overriding [`Settings::store_path`].
pub const ENV_STORE_PATH: &str = "PROFIT_TRACKER_STORE";

/// Environment variable overriding [`Settings::default_username`].
pub const ENV_USERNAME: &str = "PROFIT_TRACKER_USER";

/// Runtime configuration for a tracker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Location of the JSON profile store.
    pub store_path: PathBuf,

    /// Username preselected when the caller supplies none.
    pub default_username: String,

    /// Goal given to profiles that have never been saved.
    pub default_goal: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("profiles.json"),
            default_username: "default_user".to_string(),
            default_goal: DEFAULT_PROFIT_GOAL,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `PROFIT_TRACKER_STORE` / `PROFIT_TRACKER_USER`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for the known keys.
    /// Blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_blank(ENV_STORE_PATH) {
            settings.store_path = PathBuf::from(path.trim());
        }
        if let Some(user) = non_blank(ENV_USERNAME) {
            settings.default_username = user;
        }
        settings
    }
}
