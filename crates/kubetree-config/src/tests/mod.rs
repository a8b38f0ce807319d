use super::*;

#[test]
fn default_config_has_expected_timings() {
    let config = AppConfig::default();
    assert_eq!(config.general.tick_rate_ms, 250);
    assert_eq!(config.general.list_timeout_ms, 500);
    assert_eq!(config.list_timeout(), Duration::from_millis(500));
    assert_eq!(config.tick_rate(), Duration::from_millis(250));
}

#[test]
fn embedded_defaults_match_struct_defaults() {
    let config = AppConfig::default();
    let general = GeneralConfig::default();
    let theme = ThemeConfig::default();
    assert_eq!(config.general.tick_rate_ms, general.tick_rate_ms);
    assert_eq!(config.general.list_timeout_ms, general.list_timeout_ms);
    assert_eq!(config.theme.active, theme.active);
    assert_eq!(config.theme.error, theme.error);
    assert_eq!(config.theme.selection_bg, theme.selection_bg);
}

#[test]
fn default_keybindings_are_valid_and_unique() {
    let config = AppConfig::default();
    assert!(validate_keybindings(&config.keybindings).is_empty());
    assert!(check_collisions(&config.keybindings).is_empty());
    assert_eq!(config.keybindings.global.get("quit").map(String::as_str), Some("q"));
    assert_eq!(config.keybindings.tree.get("toggle").map(String::as_str), Some("space"));
}

#[test]
fn parse_general_from_toml() {
    let raw = r#"
[general]
list_timeout_ms = 2000
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.general.list_timeout_ms, 2000);
    assert_eq!(config.general.tick_rate_ms, 250);
}

#[test]
fn kebab_case_aliases_are_accepted() {
    let raw = r#"
[general]
list-timeout-ms = 750

[theme]
selection-bg = "blue"
"#;
    let config: AppConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.general.list_timeout_ms, 750);
    assert_eq!(config.theme.selection_bg, "blue");
}

#[test]
fn partial_toml_merges_keybindings_per_key() {
    let mut base = AppConfig::default();
    let user: AppConfig = toml::from_str(
        r#"
[keybindings.tree]
up = "ctrl+p"
"#,
    )
    .unwrap();
    base.merge(user);

    assert_eq!(base.keybindings.tree.get("up").unwrap(), "ctrl+p");
    assert_eq!(base.keybindings.tree.get("down").unwrap(), "j");
    assert_eq!(base.keybindings.global.get("quit").unwrap(), "q");
}

#[test]
fn load_from_replaces_invalid_binding_with_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[keybindings.tree]\ndown = \"nope+j\"\n").unwrap();

    let (config, warnings) = AppConfig::load_from(&path).unwrap();

    assert_eq!(config.keybindings.tree.get("down").unwrap(), "j");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("tree.down"));
}

#[test]
fn load_from_drops_invalid_unknown_action() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[keybindings.tree]\nwarp = \"bogus-key\"\n").unwrap();

    let (config, warnings) = AppConfig::load_from(&path).unwrap();

    assert!(!config.keybindings.tree.contains_key("warp"));
    assert_eq!(warnings.len(), 1);
}

#[test]
fn load_from_reports_collisions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[keybindings.tree]\ncollapse = \"q\"\n").unwrap();

    let (_, warnings) = AppConfig::load_from(&path).unwrap();

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("\"q\""));
}

#[test]
fn load_from_invalid_toml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general\n").unwrap();
    assert!(AppConfig::load_from(&path).is_err());
}

#[test]
fn load_from_replaces_zero_durations_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general]\ntick_rate_ms = 0\nlist_timeout_ms = 0\n").unwrap();

    let (config, warnings) = AppConfig::load_from(&path).unwrap();

    assert_eq!(config.tick_rate(), Duration::from_millis(250));
    assert_eq!(config.list_timeout(), Duration::from_millis(500));
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("tick_rate_ms"));
    assert!(warnings[1].contains("list_timeout_ms"));
}

#[test]
fn positive_durations_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[general]\ntick_rate_ms = 1\nlist_timeout_ms = 3000\n").unwrap();

    let (config, warnings) = AppConfig::load_from(&path).unwrap();

    assert_eq!(config.tick_rate(), Duration::from_millis(1));
    assert_eq!(config.list_timeout(), Duration::from_secs(3));
    assert!(warnings.is_empty());
}
