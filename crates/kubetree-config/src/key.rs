use std::fmt;
use std::str::FromStr;

/// Key names accepted in `[keybindings]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyName {
    Char(char),
    Enter,
    Esc,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// A parsed binding such as `ctrl+q`, `G` or `space`.
///
/// Letters are canonical: with Ctrl they are lowercase and carry no Shift,
/// otherwise an uppercase letter always carries Shift. Shift is dropped from
/// other characters since the terminal already reports the shifted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub key: KeyName,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeySpec {
    pub fn new(key: KeyName, ctrl: bool, alt: bool, shift: bool) -> Self {
        Self { key, ctrl, alt, shift }.canonical()
    }

    fn canonical(mut self) -> Self {
        if let KeyName::Char(c) = self.key {
            if !c.is_ascii_alphabetic() {
                self.shift = false;
            } else if self.ctrl {
                self.key = KeyName::Char(c.to_ascii_lowercase());
                self.shift = false;
            } else if self.shift || c.is_ascii_uppercase() {
                self.key = KeyName::Char(c.to_ascii_uppercase());
                self.shift = true;
            }
        }
        self
    }
}

impl FromStr for KeySpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("empty key string".to_string());
        }

        let mut parts: Vec<&str> = trimmed.split('+').collect();
        let last = parts.pop().unwrap_or_default();
        let (mut ctrl, mut alt, mut shift) = (false, false, false);
        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" => ctrl = true,
                "alt" => alt = true,
                "shift" => shift = true,
                other => return Err(format!("unknown modifier: {other}")),
            }
        }

        let key = match last.to_ascii_lowercase().as_str() {
            "enter" => KeyName::Enter,
            "esc" => KeyName::Esc,
            "tab" => KeyName::Tab,
            "up" => KeyName::Up,
            "down" => KeyName::Down,
            "left" => KeyName::Left,
            "right" => KeyName::Right,
            "home" => KeyName::Home,
            "end" => KeyName::End,
            "space" => KeyName::Char(' '),
            _ => {
                let mut chars = last.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyName::Char(c),
                    _ => return Err(format!("unrecognized key: {last}")),
                }
            }
        };

        Ok(Self::new(key, ctrl, alt, shift))
    }
}

/// Short form for the status bar: `Ctrl+q`, `G`, `Space`.
impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        let name = match self.key {
            KeyName::Char(' ') => "Space",
            KeyName::Char(c) => return write!(f, "{c}"),
            KeyName::Enter => "Enter",
            KeyName::Esc => "Esc",
            KeyName::Tab => "Tab",
            KeyName::Up => "Up",
            KeyName::Down => "Down",
            KeyName::Left => "Left",
            KeyName::Right => "Right",
            KeyName::Home => "Home",
            KeyName::End => "End",
        };
        if self.shift {
            f.write_str("Shift+")?;
        }
        f.write_str(name)
    }
}
