use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub fg: String,
    pub accent: String,
    pub active: String,
    pub error: String,
    pub visited: String,
    #[serde(alias = "selection-fg")]
    pub selection_fg: String,
    #[serde(alias = "selection-bg")]
    pub selection_bg: String,
    #[serde(alias = "text-dim")]
    pub text_dim: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            fg: "#cdd6f4".into(),
            accent: "#89b4fa".into(),
            active: "green".into(),
            error: "red".into(),
            visited: "cyan".into(),
            selection_fg: "#cdd6f4".into(),
            selection_bg: "#45475a".into(),
            text_dim: "#6c7086".into(),
        }
    }
}
