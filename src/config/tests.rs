use super::*;
use std::io::Write;

const NESTED: &str = r#"{
    "mastodon": {
        "base_url": "https://botsin.space",
        "access_token": "masto-token",
        "visibility": "unlisted"
    },
    "openai": {
        "api_key": "sk-abc",
        "prompt": "Write a weather forecast for a fictional town."
    },
    "segmenter": { "max_segment_length": 280 },
    "post_interval_secs": 60
}"#;

const LEGACY: &str = r#"{
    "mastodon_access_token": "masto-token",
    "mastodon_base_url": "https://botsin.space",
    "openai_api_key": "sk-abc",
    "openai_prompt": "Forecast please",
    "max_tokens": 400,
    "temperature": 0.9
}"#;

#[test]
fn test_nested_config_with_defaults() {
    let config = Config::from_json(NESTED).unwrap();

    assert_eq!(config.mastodon.visibility, Some(Visibility::Unlisted));
    assert_eq!(config.openai.model, DEFAULT_MODEL);
    assert_eq!(config.openai.max_tokens, 1000);
    assert_eq!(config.segmenter.max_segment_length, 280);
    assert_eq!(
        config.segmenter.headings,
        SegmenterConfig::default().headings
    );
    assert_eq!(config.post_interval(), Duration::from_secs(60));
    assert!(config.log_file.is_none());
}

#[test]
fn test_legacy_flat_config() {
    let config = Config::from_json(LEGACY).unwrap();

    assert_eq!(config.mastodon.access_token, "masto-token");
    assert_eq!(config.openai.prompt, "Forecast please");
    assert_eq!(config.openai.max_tokens, 400);
    assert!((config.openai.temperature - 0.9).abs() < f32::EPSILON);
    assert_eq!(config.post_interval(), Duration::from_secs(7200));
    assert_eq!(config.segmenter, SegmenterConfig::default());
}

#[test]
fn test_bot_settings_from_config() {
    let settings = Config::from_json(LEGACY).unwrap().bot_settings();

    assert_eq!(settings.prompt, "Forecast please");
    assert_eq!(settings.max_tokens, 400);
}

#[test]
fn test_empty_credentials_rejected() {
    let raw = NESTED.replace("sk-abc", " ");
    let err = Config::from_json(&raw).unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("openai.api_key")));
}

#[test]
fn test_zero_interval_rejected() {
    let raw = NESTED.replace("\"post_interval_secs\": 60", "\"post_interval_secs\": 0");
    assert!(matches!(
        Config::from_json(&raw),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_bad_segment_limit_rejected() {
    let raw = NESTED.replace("280", "3");
    assert!(matches!(
        Config::from_json(&raw),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        Config::from_json("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(NESTED.as_bytes()).unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.mastodon.base_url, "https://botsin.space");
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("missing.json")).unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
}
