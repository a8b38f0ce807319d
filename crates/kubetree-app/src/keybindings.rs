use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use kubetree_config::{KeySpec, KeybindingsConfig};

use crate::command::Command;

mod parsing;

use parsing::{normalize_key_event, to_key_event};

/// Maps key events to commands. Arrow keys, Enter, Esc and Ctrl+C are always
/// bound; everything else comes from the config.
pub struct KeybindingDispatcher {
    bindings: HashMap<KeyEvent, Command>,
    reverse: Vec<(String, String, String)>,
}

impl KeybindingDispatcher {
    pub fn from_config(config: &KeybindingsConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut reverse = Vec::new();
        for (name, key_str) in config.global.iter().chain(config.tree.iter()) {
            let Some(cmd) = Command::from_name(name) else {
                tracing::warn!("unknown keybinding action: {name}");
                continue;
            };
            let Ok(spec) = key_str.parse::<KeySpec>() else {
                tracing::warn!("invalid key for {name}: {key_str}");
                continue;
            };
            bindings.insert(to_key_event(&spec), cmd);
            reverse.push((name.clone(), spec.to_string(), cmd.description().to_string()));
        }
        Self { bindings, reverse }
    }

    pub fn dispatch(&self, key: KeyEvent) -> Option<Command> {
        let key = normalize_key_event(key);

        if let Some(cmd) = self.bindings.get(&key) {
            return Some(*cmd);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => Some(Command::Quit),
            (KeyCode::Up, _) => Some(Command::Up),
            (KeyCode::Down, _) => Some(Command::Down),
            (KeyCode::Home, _) => Some(Command::Top),
            (KeyCode::End, _) => Some(Command::Bottom),
            (KeyCode::Enter, _) => Some(Command::Activate),
            (KeyCode::Right, _) => Some(Command::Toggle),
            (KeyCode::Left, _) => Some(Command::Collapse),
            _ => None,
        }
    }

    /// (key, description) pairs for the status bar.
    pub fn hints(&self) -> Vec<(String, String)> {
        let mut hints = vec![("Enter".to_string(), Command::Activate.description().to_string())];
        for action in ["toggle", "collapse", "quit"] {
            if let Some((_, key, desc)) = self.reverse.iter().find(|(name, _, _)| name == action) {
                hints.push((key.clone(), desc.clone()));
            }
        }
        hints
    }
}
