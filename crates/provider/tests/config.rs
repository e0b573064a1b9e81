//! Tests for `ProviderConfig` and `ProviderKind`.

use studybuddy_provider::{ProviderConfig, ProviderError, ProviderKind};

#[test]
fn test_kind_aliases() {
    assert_eq!("local".parse::<ProviderKind>().unwrap(), ProviderKind::Ollama);
    assert_eq!("Claude".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
    assert_eq!(" gemini ".parse::<ProviderKind>().unwrap(), ProviderKind::Google);
    assert!(matches!(
        "".parse::<ProviderKind>(),
        Err(ProviderError::Unsupported(_))
    ));
}

#[test]
fn test_kind_round_trips_through_display() {
    for kind in ProviderKind::ALL {
        assert_eq!(kind.to_string().parse::<ProviderKind>().unwrap(), kind);
    }
}

#[test]
fn test_only_ollama_is_keyless() {
    let keyless: Vec<_> = ProviderKind::ALL
        .into_iter()
        .filter(|k| !k.requires_key())
        .collect();
    assert_eq!(keyless, vec![ProviderKind::Ollama]);
}

#[test]
fn test_provider_config_from_json() {
    let json = r#"{"name": "groq", "apiKey": "gsk", "defaultModel": "llama-3.1-8b-instant"}"#;
    let config: ProviderConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.kind().unwrap(), ProviderKind::Groq);
    assert_eq!(config.api_key(), Some("gsk"));
    assert_eq!(config.base_url(ProviderKind::Groq), "https://api.groq.com/openai");
}

#[test]
fn test_base_url_override_is_trimmed() {
    let config = ProviderConfig::new("ollama", "m").with_base_url("http://gpu-box:11434///");
    assert_eq!(config.base_url(ProviderKind::Ollama), "http://gpu-box:11434");

    let blank = ProviderConfig::new("ollama", "m").with_base_url("");
    assert_eq!(blank.base_url(ProviderKind::Ollama), "http://localhost:11434");
}

#[test]
fn test_debug_hides_key() {
    let config = ProviderConfig::new("openai", "gpt-4o").with_api_key("sk-secret");
    let debug = format!("{config:?}");
    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("has_api_key: true"));
}
