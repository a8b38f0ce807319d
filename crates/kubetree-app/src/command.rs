#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Up,
    Down,
    Top,
    Bottom,
    /// Enter: toggle a context or select a namespace.
    Activate,
    /// Toggle a context; no-op on a namespace.
    Toggle,
    Collapse,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "quit" => Some(Self::Quit),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "activate" => Some(Self::Activate),
            "toggle" => Some(Self::Toggle),
            "collapse" => Some(Self::Collapse),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Activate => "Expand/Select",
            Self::Toggle => "Expand",
            Self::Collapse => "Collapse",
        }
    }
}
