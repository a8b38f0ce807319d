use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::key::KeySpec;

/// Action name → key string, e.g. `quit = "ctrl+q"`.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct KeybindingsConfig {
    #[serde(default)]
    pub global: IndexMap<String, String>,
    #[serde(default)]
    pub tree: IndexMap<String, String>,
}

impl KeybindingsConfig {
    fn group_entries(&self) -> [(&str, &IndexMap<String, String>); 2] {
        [("global", &self.global), ("tree", &self.tree)]
    }
}

pub fn validate_keybindings(config: &KeybindingsConfig) -> Vec<(String, String, String)> {
    let mut errors = Vec::new();
    for (group, map) in config.group_entries() {
        for (name, key_str) in map {
            if let Err(e) = key_str.parse::<KeySpec>() {
                errors.push((group.to_string(), name.clone(), e));
            }
        }
    }
    errors
}

/// Bindings that resolve to the same key. Unparseable strings are skipped;
/// `validate_keybindings` reports those.
pub fn check_collisions(config: &KeybindingsConfig) -> Vec<(String, String, String)> {
    let mut seen: HashMap<KeySpec, String> = HashMap::new();
    let mut collisions = Vec::new();
    for (group, map) in config.group_entries() {
        for key_str in map.values() {
            let Ok(key) = key_str.parse::<KeySpec>() else { continue };
            if let Some(prev_group) = seen.get(&key) {
                collisions.push((key_str.clone(), prev_group.clone(), group.to_string()));
            } else {
                seen.insert(key, group.to_string());
            }
        }
    }
    collisions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_catches_bad_key_string() {
        let mut config = KeybindingsConfig::default();
        config.global.insert("quit".into(), "notakey+combo+bad".into());
        config.tree.insert("up".into(), "k".into());

        let errors = validate_keybindings(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "global");
        assert_eq!(errors[0].1, "quit");
    }

    #[test]
    fn validate_accepts_valid_keys() {
        let mut config = KeybindingsConfig::default();
        config.global.insert("quit".into(), "ctrl+q".into());
        config.tree.insert("up".into(), "k".into());
        config.tree.insert("toggle".into(), "space".into());
        config.tree.insert("bottom".into(), "shift+g".into());
        config.tree.insert("collapse".into(), "enter".into());

        assert!(validate_keybindings(&config).is_empty());
    }

    #[test]
    fn validate_rejects_empty_and_unknown_names() {
        let mut config = KeybindingsConfig::default();
        config.tree.insert("up".into(), "  ".into());
        config.tree.insert("down".into(), "hyper+j".into());
        config.tree.insert("top".into(), "fx".into());

        let errors = validate_keybindings(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn check_collisions_detects_duplicates() {
        let mut config = KeybindingsConfig::default();
        config.global.insert("quit".into(), "q".into());
        config.tree.insert("collapse".into(), "q".into());

        let collisions = check_collisions(&config);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].0, "q");
    }

    #[test]
    fn check_collisions_is_case_sensitive_for_letters() {
        let mut config = KeybindingsConfig::default();
        config.tree.insert("top".into(), "g".into());
        config.tree.insert("bottom".into(), "G".into());

        assert!(check_collisions(&config).is_empty());
    }

    #[test]
    fn check_collisions_compares_parsed_keys() {
        let mut config = KeybindingsConfig::default();
        config.tree.insert("bottom".into(), "G".into());
        config.tree.insert("top".into(), "shift+g".into());

        assert_eq!(check_collisions(&config).len(), 1);
    }
}
