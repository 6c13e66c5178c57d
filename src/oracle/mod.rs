pub mod providers;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::OracleConfig;
use crate::error::OracleError;
use crate::types::ChatMessage;

/// The external text-completion service.
///
/// Given an ordered, role-tagged transcript it returns one new reply.
/// Nondeterministic, latency-bearing, fallible; its output is untrusted
/// input to the reply classifier.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, OracleError>;
}

/// Build the configured provider.
pub fn from_config(config: &OracleConfig) -> anyhow::Result<Arc<dyn CompletionOracle>> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(providers::OpenAiOracle::new(config)?)),
        "anthropic" => Ok(Arc::new(providers::AnthropicOracle::new(config)?)),
        other => anyhow::bail!("unknown oracle provider: {other}"),
    }
}
