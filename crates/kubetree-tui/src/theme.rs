use kubetree_config::ThemeConfig;
use ratatui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub active: Style,
    pub error: Style,
    pub visited: Style,
    pub selection: Style,
    pub text_dim: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let fg = parse_color_or_default(&config.fg);
        let accent = parse_color_or_default(&config.accent);
        let selection_fg = parse_color_or_default(&config.selection_fg);
        let selection_bg = parse_color_or_default(&config.selection_bg);

        Self {
            fg,
            accent,
            active: Style::default().fg(parse_color_or_default(&config.active)),
            error: Style::default().fg(parse_color_or_default(&config.error)),
            visited: Style::default().fg(parse_color_or_default(&config.visited)),
            selection: Style::default().fg(selection_fg).bg(selection_bg),
            text_dim: Style::default().fg(parse_color_or_default(&config.text_dim)),
        }
    }
}

fn parse_color_or_default(s: &str) -> Color {
    parse_color(s).unwrap_or(Color::Reset)
}

/// Parse a color string into a ratatui `Color`.
///
/// Supported formats:
/// - `"#89b4fa"` hex RGB
/// - `"rgb(137,180,250)"` functional RGB
/// - `"red"`, `"blue"`, etc. named colors
/// - `"default"` terminal default (`Color::Reset`)
pub fn parse_color(s: &str) -> anyhow::Result<Color> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("default") {
        return Ok(Color::Reset);
    }

    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("invalid hex color \"{s}\": expected 6 hex digits after '#'");
        }
        let component = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| anyhow::anyhow!("invalid hex color \"{s}\": bad {name} component"))
        };
        return Ok(Color::Rgb(component(0..2, "red")?, component(2..4, "green")?, component(4..6, "blue")?));
    }

    if let Some(inner) = s.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
        let parts: Vec<&str> = inner.split(',').collect();
        if parts.len() != 3 {
            anyhow::bail!("invalid rgb color \"{s}\": expected rgb(r,g,b)");
        }
        let value = |part: &str| -> anyhow::Result<u8> {
            part.trim().parse().map_err(|_| anyhow::anyhow!("invalid rgb color \"{s}\": bad value \"{part}\""))
        };
        return Ok(Color::Rgb(value(parts[0])?, value(parts[1])?, value(parts[2])?));
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" | "turquoise" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Ok(Color::DarkGray),
        "lightred" | "light_red" => Ok(Color::LightRed),
        "lightgreen" | "light_green" => Ok(Color::LightGreen),
        "lightyellow" | "light_yellow" => Ok(Color::LightYellow),
        "lightblue" | "light_blue" => Ok(Color::LightBlue),
        "lightmagenta" | "light_magenta" => Ok(Color::LightMagenta),
        "lightcyan" | "light_cyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        _ => anyhow::bail!(
            "unknown color \"{s}\": expected hex (#rrggbb), rgb(r,g,b), a named color (red, blue, ...), or \"default\""
        ),
    }
}
