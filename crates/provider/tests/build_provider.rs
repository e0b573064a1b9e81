//! Tests for `build_provider()` factory.

use studybuddy_provider::{Provider, ProviderConfig, ProviderError, ProviderKind, build_provider};

#[test]
fn test_build_provider_ollama_no_key() {
    let config = ProviderConfig::new("ollama", "llama3");
    let p = build_provider(&config, llm::Client::new()).unwrap();
    assert!(matches!(p, Provider::Ollama(_)));
    assert_eq!(p.kind(), ProviderKind::Ollama);
}

#[test]
fn test_build_provider_names_are_case_insensitive() {
    for name in ["OpenAI", "GROQ", "together", "Anthropic", "claude", "Gemini", "google", "Local"] {
        let config = ProviderConfig::new(name, "m").with_api_key("k");
        assert!(build_provider(&config, llm::Client::new()).is_ok(), "{name}");
    }
}

#[test]
fn test_build_provider_openai_compatible_kinds() {
    for (name, kind) in [
        ("openai", ProviderKind::OpenAI),
        ("groq", ProviderKind::Groq),
        ("together", ProviderKind::Together),
    ] {
        let config = ProviderConfig::new(name, "m").with_api_key("k");
        let p = build_provider(&config, llm::Client::new()).unwrap();
        assert!(matches!(p, Provider::OpenAI(_)));
        assert_eq!(p.kind(), kind);
    }
}

#[test]
fn test_build_provider_claude_and_gemini() {
    let claude = ProviderConfig::new("anthropic", "claude-3-5-haiku-20241022").with_api_key("k");
    let p = build_provider(&claude, llm::Client::new()).unwrap();
    assert!(matches!(p, Provider::Claude(_)));

    let gemini = ProviderConfig::new("google", "gemini-1.5-flash").with_api_key("k");
    let p = build_provider(&gemini, llm::Client::new()).unwrap();
    assert!(matches!(p, Provider::Gemini(_)));
}

#[test]
fn test_build_provider_custom_url() {
    let config = ProviderConfig::new("openai", "gpt-4o")
        .with_api_key("k")
        .with_base_url("http://localhost:8080/");
    let Provider::OpenAI(p) = build_provider(&config, llm::Client::new()).unwrap() else {
        panic!("expected openai");
    };
    assert_eq!(p.endpoint(), "http://localhost:8080/v1/chat/completions");
}

#[test]
fn test_build_provider_default_urls() {
    let config = ProviderConfig::new("claude", "m").with_api_key("k");
    let Provider::Claude(p) = build_provider(&config, llm::Client::new()).unwrap() else {
        panic!("expected claude");
    };
    assert_eq!(p.endpoint(), "https://api.anthropic.com/v1/messages");

    let config = ProviderConfig::new("gemini", "m").with_api_key("k");
    let Provider::Gemini(p) = build_provider(&config, llm::Client::new()).unwrap() else {
        panic!("expected gemini");
    };
    assert_eq!(
        p.endpoint("models/gemini-1.5-flash"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:streamGenerateContent?alt=sse"
    );
}

#[test]
fn test_build_provider_unknown_name() {
    let config = ProviderConfig::new("mistral", "m").with_api_key("k");
    let err = build_provider(&config, llm::Client::new()).err().unwrap();
    assert!(matches!(err, ProviderError::Unsupported(ref name) if name == "mistral"));
    assert!(err.is_config());
}

#[test]
fn test_build_provider_missing_key() {
    for name in ["openai", "anthropic", "google", "groq", "together"] {
        let config = ProviderConfig::new(name, "m");
        let err = build_provider(&config, llm::Client::new()).err().unwrap();
        assert!(matches!(err, ProviderError::MissingCredential(_)), "{name}");
        assert!(err.is_config());

        let blank = ProviderConfig::new(name, "m").with_api_key("  ");
        assert!(build_provider(&blank, llm::Client::new()).is_err(), "{name}");
    }
}

#[test]
fn test_build_provider_rejects_unencodable_key() {
    let config = ProviderConfig::new("openai", "m").with_api_key("bad\nkey");
    let err = build_provider(&config, llm::Client::new()).err().unwrap();
    assert!(err.is_config());
}
