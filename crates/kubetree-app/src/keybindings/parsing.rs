use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kubetree_config::{KeyName, KeySpec};

/// Brings a terminal key event into the same canonical form `KeySpec` uses,
/// so both sides of the binding lookup agree on letter case and Shift.
pub(super) fn normalize_key_event(key: KeyEvent) -> KeyEvent {
    let Some(spec) = key_spec(key.code, key.modifiers) else {
        return KeyEvent::new(key.code, key.modifiers);
    };
    to_key_event(&spec)
}

pub(super) fn to_key_event(spec: &KeySpec) -> KeyEvent {
    let mut modifiers = KeyModifiers::NONE;
    if spec.ctrl {
        modifiers |= KeyModifiers::CONTROL;
    }
    if spec.alt {
        modifiers |= KeyModifiers::ALT;
    }
    if spec.shift {
        modifiers |= KeyModifiers::SHIFT;
    }
    let code = match spec.key {
        KeyName::Char(c) => KeyCode::Char(c),
        KeyName::Enter => KeyCode::Enter,
        KeyName::Esc => KeyCode::Esc,
        KeyName::Tab => KeyCode::Tab,
        KeyName::Up => KeyCode::Up,
        KeyName::Down => KeyCode::Down,
        KeyName::Left => KeyCode::Left,
        KeyName::Right => KeyCode::Right,
        KeyName::Home => KeyCode::Home,
        KeyName::End => KeyCode::End,
    };
    KeyEvent::new(code, modifiers)
}

// Terminals report Shift+Tab as BackTab.
fn key_spec(code: KeyCode, modifiers: KeyModifiers) -> Option<KeySpec> {
    let mut shift = modifiers.contains(KeyModifiers::SHIFT);
    let key = match code {
        KeyCode::Char(c) => KeyName::Char(c),
        KeyCode::Enter => KeyName::Enter,
        KeyCode::Esc => KeyName::Esc,
        KeyCode::Tab => KeyName::Tab,
        KeyCode::BackTab => {
            shift = true;
            KeyName::Tab
        }
        KeyCode::Up => KeyName::Up,
        KeyCode::Down => KeyName::Down,
        KeyCode::Left => KeyName::Left,
        KeyCode::Right => KeyName::Right,
        KeyCode::Home => KeyName::Home,
        KeyCode::End => KeyName::End,
        _ => return None,
    };
    Some(KeySpec::new(
        key,
        modifiers.contains(KeyModifiers::CONTROL),
        modifiers.contains(KeyModifiers::ALT),
        shift,
    ))
}
