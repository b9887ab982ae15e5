use super::*;

#[test]
fn test_empty_file_uses_defaults() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.time_settings().initial, Duration::from_secs(600));
    assert!(config.engine_plays(Color::Black));
    assert!(!config.engine_plays(Color::White));
}

#[test]
fn test_full_file() {
    let config = GameConfig::from_toml_str(
        r#"
        time_control_secs = 0
        increment_secs = 3
        ai_enabled = true
        ai_color = "white"
        difficulty = "expert"
        jitter = 15
        seed = 42
        "#,
    )
    .unwrap();
    assert!(config.time_settings().is_unlimited());
    assert_eq!(config.increment_secs, 3);
    assert_eq!(config.ai_color, Color::White);
    assert_eq!(config.difficulty, Difficulty::Expert);
    assert_eq!(config.jitter, 15);
    assert_eq!(config.seed, Some(42));
}

#[test]
fn test_bad_values_are_rejected() {
    assert!(matches!(
        GameConfig::from_toml_str("difficulty = \"impossible\""),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        GameConfig::from_toml_str("ai_color = \"green\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        GameConfig::load("/nonexistent/game.toml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_two_player_has_no_engine() {
    let config = GameConfig::two_player();
    assert!(!config.engine_plays(Color::White));
    assert!(!config.engine_plays(Color::Black));
}
