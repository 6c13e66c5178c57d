use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;
use url::Url;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VibescoutConfig {
    pub gateway: GatewayConfig,
    pub oracle: OracleConfig,
    pub retrieval: RetrievalConfig,
    pub dialogue: DialogueConfig,
    pub profiles: ProfilesConfig,
}

#[derive(Debug, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Frontend origin allowed by CORS.
    #[serde(default = "default_origin")]
    pub allowed_origin: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
            allowed_origin: default_origin(),
        }
    }
}

fn default_port() -> u16 {
    7300
}
fn default_bind() -> String {
    "127.0.0.1".into()
}
fn default_origin() -> String {
    "http://localhost:3000".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Filled per provider when left empty.
    #[serde(default)]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_oracle_timeout")]
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: String::new(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_oracle_timeout(),
        }
    }
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_temperature() -> f32 {
    0.7
}
fn default_oracle_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    /// Similarity-search sidecar endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Blocks requested per search. Larger than `show_k` so dedup
    /// filtering still leaves something to show.
    #[serde(default = "default_fetch_k")]
    pub fetch_k: usize,
    /// Blocks surfaced to the user per turn.
    #[serde(default = "default_show_k")]
    pub show_k: usize,
    #[serde(default = "default_retrieval_timeout")]
    pub timeout_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            fetch_k: default_fetch_k(),
            show_k: default_show_k(),
            timeout_secs: default_retrieval_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:7700/search".into()
}
fn default_fetch_k() -> usize {
    5
}
fn default_show_k() -> usize {
    2
}
fn default_retrieval_timeout() -> u64 {
    10
}

/// Token sets for the reply classifier. Kept as configuration because
/// the keyword heuristic is language-specific.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    #[serde(default = "default_search_token")]
    pub search_token: String,
    #[serde(default = "default_celebration_tokens")]
    pub celebration_tokens: Vec<String>,
    #[serde(default = "default_continuation_tokens")]
    pub continuation_tokens: Vec<String>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            search_token: default_search_token(),
            celebration_tokens: default_celebration_tokens(),
            continuation_tokens: default_continuation_tokens(),
        }
    }
}

fn default_search_token() -> String {
    "SEARCH_ACTION".into()
}
fn default_celebration_tokens() -> Vec<String> {
    ["have", "great", "enjoy", "awesome"]
        .map(String::from)
        .to_vec()
}
fn default_continuation_tokens() -> Vec<String> {
    vec!["more".into()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesConfig {
    #[serde(default = "default_profiles_path")]
    pub path: PathBuf,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            path: default_profiles_path(),
        }
    }
}

fn default_profiles_path() -> PathBuf {
    PathBuf::from("users.json")
}

/// Load configuration from file or use defaults.
///
/// Search order:
/// 1. `VIBESCOUT_CONFIG` env var
/// 2. `~/.vibescout/config.toml`
/// 3. Zero-config defaults (no file needed)
pub fn load() -> anyhow::Result<VibescoutConfig> {
    let path = config_path();

    let mut config = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config: VibescoutConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))?;
        info!("loaded config from {}", path.display());
        config
    } else {
        info!("no config file found, using zero-config defaults");
        VibescoutConfig::default()
    };

    resolve(&mut config);
    validate(&config)?;
    Ok(config)
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("VIBESCOUT_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".vibescout").join("config.toml")
}

/// Fill in provider-dependent defaults the file left empty.
pub fn resolve(config: &mut VibescoutConfig) {
    if config.oracle.api_key.is_none() {
        config.oracle.api_key = match config.oracle.provider.as_str() {
            "openai" => std::env::var("OPENAI_API_KEY").ok(),
            "anthropic" => std::env::var("ANTHROPIC_API_KEY").ok(),
            _ => None,
        };
    }

    if config.oracle.base_url.is_empty() {
        config.oracle.base_url = match config.oracle.provider.as_str() {
            "anthropic" => "https://api.anthropic.com".into(),
            _ => "https://api.openai.com/v1".into(),
        };
    }
}

/// Validate the config and return clear error messages.
pub fn validate(config: &VibescoutConfig) -> anyhow::Result<()> {
    let valid_providers = ["openai", "anthropic"];
    if !valid_providers.contains(&config.oracle.provider.as_str()) {
        anyhow::bail!(
            "invalid provider '{}': must be one of {:?}",
            config.oracle.provider,
            valid_providers
        );
    }

    if config.oracle.max_tokens == 0 {
        anyhow::bail!("oracle.max_tokens must be > 0");
    }

    Url::parse(&config.oracle.base_url)
        .map_err(|e| anyhow::anyhow!("oracle.base_url '{}': {e}", config.oracle.base_url))?;
    Url::parse(&config.retrieval.endpoint)
        .map_err(|e| anyhow::anyhow!("retrieval.endpoint '{}': {e}", config.retrieval.endpoint))?;

    if config.retrieval.show_k == 0 {
        anyhow::bail!("retrieval.show_k must be >= 1");
    }
    if config.retrieval.fetch_k < config.retrieval.show_k {
        anyhow::bail!(
            "retrieval.fetch_k ({}) must be >= retrieval.show_k ({})",
            config.retrieval.fetch_k,
            config.retrieval.show_k
        );
    }

    if config.dialogue.search_token.trim().is_empty() {
        anyhow::bail!("dialogue.search_token must not be empty");
    }

    Ok(())
}
