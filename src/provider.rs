//! The adapter seam for LLM backends, grounded on
//! `llm_guardian.integrations.base.BaseLLMClient`.

use crate::error::ProviderError;
use async_trait::async_trait;
use guardian_core::models::{LlmResponse, RequestContext};
use std::collections::HashMap;

#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, request: &RequestContext) -> Result<LlmResponse, ProviderError>;

    fn estimate_cost(&self, model: &str, tokens: u64) -> f64;

    fn provider_name(&self) -> &str;
}

/// A reference adapter in the shape of
/// `llm_guardian.integrations.anthropic_client.AnthropicClient`: a per-model
/// pricing table and a `(tokens / 1_000_000) * price` cost formula. Actual
/// network calls are left to the embedder; this crate only owns the pricing
/// and response-shaping logic the original adapter layered on top.
pub struct AnthropicProvider {
    pricing_per_million_tokens: HashMap<String, f64>,
}

impl AnthropicProvider {
    pub fn new() -> Self {
        let mut pricing = HashMap::new();
        pricing.insert("claude-3-5-sonnet-latest".to_string(), 3.0);
        pricing.insert("claude-3-5-haiku-latest".to_string(), 0.8);
        pricing.insert("claude-3-opus-latest".to_string(), 15.0);
        Self { pricing_per_million_tokens: pricing }
    }
}

impl Default for AnthropicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn generate(&self, request: &RequestContext) -> Result<LlmResponse, ProviderError> {
        Err(ProviderError::RequestFailed {
            provider: self.provider_name().to_string(),
            message: format!(
                "no transport configured for request {} — wire a real client in before use",
                request.request_id
            ),
        })
    }

    fn estimate_cost(&self, model: &str, tokens: u64) -> f64 {
        let price_per_million = self.pricing_per_million_tokens.get(model).copied().unwrap_or(3.0);
        (tokens as f64 / 1_000_000.0) * price_per_million
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_scales_with_tokens_and_model_price() {
        let provider = AnthropicProvider::new();
        let cost = provider.estimate_cost("claude-3-5-sonnet-latest", 1_000_000);
        assert_eq!(cost, 3.0);
        let cost = provider.estimate_cost("claude-3-opus-latest", 500_000);
        assert_eq!(cost, 7.5);
    }

    #[test]
    fn unknown_model_falls_back_to_default_price() {
        let provider = AnthropicProvider::new();
        let cost = provider.estimate_cost("some-future-model", 1_000_000);
        assert_eq!(cost, 3.0);
    }
}
