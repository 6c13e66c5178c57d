use vibescout::config::{VibescoutConfig, resolve, validate};

#[test]
fn default_config_has_sensible_values() {
    let config = VibescoutConfig::default();
    assert_eq!(config.gateway.port, 7300);
    assert_eq!(config.gateway.bind, "127.0.0.1");
    assert_eq!(config.gateway.allowed_origin, "http://localhost:3000");
    assert_eq!(config.oracle.provider, "openai");
    assert_eq!(config.oracle.model, "gpt-4o-mini");
    assert_eq!(config.oracle.max_tokens, 1024);
    assert!(config.oracle.api_key.is_none());
    assert_eq!(config.retrieval.fetch_k, 5);
    assert_eq!(config.retrieval.show_k, 2);
    assert_eq!(config.dialogue.search_token, "SEARCH_ACTION");
    assert_eq!(
        config.dialogue.celebration_tokens,
        ["have", "great", "enjoy", "awesome"]
    );
    assert_eq!(config.dialogue.continuation_tokens, ["more"]);
}

#[test]
fn valid_toml_parses_successfully() {
    let toml_str = r#"
[gateway]
port = 8080
bind = "0.0.0.0"
allowed_origin = "https://app.example.com"

[oracle]
provider = "anthropic"
model = "claude-sonnet-4-5"
api_key = "sk-test"
max_tokens = 2048
temperature = 0.4

[retrieval]
endpoint = "http://search.internal:9000/query"
fetch_k = 8
show_k = 3

[dialogue]
search_token = "LOOKUP"
celebration_tokens = ["bravo"]
continuation_tokens = ["encore"]

[profiles]
path = "/var/lib/vibescout/users.json"
"#;

    let config: VibescoutConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.bind, "0.0.0.0");
    assert_eq!(config.oracle.provider, "anthropic");
    assert_eq!(config.oracle.model, "claude-sonnet-4-5");
    assert_eq!(config.oracle.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.oracle.max_tokens, 2048);
    assert_eq!(config.retrieval.endpoint, "http://search.internal:9000/query");
    assert_eq!(config.retrieval.fetch_k, 8);
    assert_eq!(config.retrieval.show_k, 3);
    assert_eq!(config.dialogue.search_token, "LOOKUP");
    assert_eq!(config.dialogue.celebration_tokens, ["bravo"]);
    assert_eq!(
        config.profiles.path.to_str(),
        Some("/var/lib/vibescout/users.json")
    );
}

#[test]
fn partial_config_uses_defaults_for_missing_fields() {
    let toml_str = r#"
[oracle]
api_key = "test-key"
"#;

    let config: VibescoutConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.gateway.port, 7300);
    assert_eq!(config.oracle.provider, "openai");
    assert_eq!(config.oracle.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.retrieval.show_k, 2);
    assert_eq!(config.dialogue.search_token, "SEARCH_ACTION");
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: VibescoutConfig = toml::from_str("").unwrap();
    assert_eq!(config.gateway.port, 7300);
    assert_eq!(config.oracle.provider, "openai");
    assert_eq!(config.retrieval.fetch_k, 5);
}

#[test]
fn resolve_fills_the_provider_base_url() {
    let mut config = VibescoutConfig::default();
    resolve(&mut config);
    assert_eq!(config.oracle.base_url, "https://api.openai.com/v1");

    let mut config = VibescoutConfig::default();
    config.oracle.provider = "anthropic".into();
    resolve(&mut config);
    assert_eq!(config.oracle.base_url, "https://api.anthropic.com");
}

#[test]
fn resolve_keeps_an_explicit_base_url() {
    let mut config = VibescoutConfig::default();
    config.oracle.base_url = "http://localhost:11434/v1".into();
    resolve(&mut config);
    assert_eq!(config.oracle.base_url, "http://localhost:11434/v1");
}

#[test]
fn unknown_provider_is_rejected() {
    let mut config = VibescoutConfig::default();
    config.oracle.provider = "mystery".into();
    resolve(&mut config);

    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("invalid provider"));
}

#[test]
fn fetch_k_must_cover_show_k() {
    let mut config = VibescoutConfig::default();
    config.retrieval.fetch_k = 1;
    config.retrieval.show_k = 2;
    resolve(&mut config);

    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("fetch_k"));
}

#[test]
fn show_k_of_zero_is_rejected() {
    let mut config = VibescoutConfig::default();
    config.retrieval.show_k = 0;
    resolve(&mut config);

    assert!(validate(&config).is_err());
}

#[test]
fn empty_search_token_is_rejected() {
    let mut config = VibescoutConfig::default();
    config.dialogue.search_token = "  ".into();
    resolve(&mut config);

    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("search_token"));
}

#[test]
fn malformed_endpoint_is_rejected() {
    let mut config = VibescoutConfig::default();
    config.retrieval.endpoint = "not a url".into();
    resolve(&mut config);

    assert!(validate(&config).is_err());
}

#[test]
fn zero_max_tokens_is_rejected() {
    let mut config = VibescoutConfig::default();
    config.oracle.max_tokens = 0;
    resolve(&mut config);

    assert!(validate(&config).is_err());
}
