pub mod general;
pub mod key;
pub mod keybindings;
pub mod theme;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use general::GeneralConfig;
pub use key::{KeyName, KeySpec};
pub use keybindings::{check_collisions, validate_keybindings, KeybindingsConfig};
pub use theme::ThemeConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

pub const DEFAULT_CONFIG: &str = include_str!("defaults.toml");

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded defaults must parse")
    }
}

impl AppConfig {
    /// Defaults overlaid with the user's file, if any. Problems with the user
    /// file are reported and otherwise ignored.
    pub fn load() -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                        Ok(user) => config.merge(user),
                        Err(e) => warnings.push(format!("invalid config at {}: {e}", path.display())),
                    },
                    Err(e) => warnings.push(format!("could not read {}: {e}", path.display())),
                }
            }
        }

        warnings.extend(config.sanitize());
        (config, warnings)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<(Self, Vec<String>)> {
        let mut config = Self::default();
        let contents = std::fs::read_to_string(path)?;
        let user: AppConfig = toml::from_str(&contents)?;
        config.merge(user);
        let warnings = config.sanitize();
        Ok((config, warnings))
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("kubetree").join("config.toml"))
    }

    fn merge(&mut self, user: AppConfig) {
        self.general = user.general;
        self.theme = user.theme;

        // Keybindings: merge per-key (user overrides, defaults preserved)
        for (k, v) in user.keybindings.global {
            self.keybindings.global.insert(k, v);
        }
        for (k, v) in user.keybindings.tree {
            self.keybindings.tree.insert(k, v);
        }
    }

    fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = self.general.sanitize();
        warnings.extend(self.sanitize_keybindings());
        warnings
    }

    // Invalid user key strings fall back to the default binding.
    fn sanitize_keybindings(&mut self) -> Vec<String> {
        let defaults = Self::default().keybindings;
        let mut warnings = Vec::new();
        for (group, action, err) in validate_keybindings(&self.keybindings) {
            warnings.push(format!("keybinding {group}.{action}: {err}; using default"));
            let (map, fallback) = match group.as_str() {
                "global" => (&mut self.keybindings.global, defaults.global.get(&action)),
                _ => (&mut self.keybindings.tree, defaults.tree.get(&action)),
            };
            match fallback {
                Some(key) => {
                    map.insert(action, key.clone());
                }
                None => {
                    map.shift_remove(&action);
                }
            }
        }
        for (key, first, second) in check_collisions(&self.keybindings) {
            warnings.push(format!("key \"{key}\" is bound in both {first} and {second}"));
        }
        warnings
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.general.tick_rate_ms)
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_millis(self.general.list_timeout_ms)
    }
}

#[cfg(test)]
mod tests;
