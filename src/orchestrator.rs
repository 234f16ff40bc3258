//! The ten-step request pipeline, grounded on
//! `llm_guardian.core.guardian.LLMGuardian.execute_request`:
//! validate input -> admit under rate limits -> call the provider through
//! its circuit breaker and retry controller -> validate and assess the
//! response -> record performance and cost -> audit log -> on failure,
//! attempt the configured fallback provider before giving up.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use guardian_circuitbreaker::{CircuitBreakerConfig, MultiCircuitBreaker};
use guardian_core::clock::{Clock, SystemClock};
use guardian_core::config::GuardianConfig;
use guardian_core::models::{LlmResponse, PerformanceMetrics, RequestContext};
use guardian_quality::{InputValidator, OutputValidator, QualityAssessor};
use guardian_ratelimiter::{RateLimiter, RateLimiterConfig};
use guardian_retry::{RetryConfig, RetryController};

use crate::audit::AuditJournal;
use crate::error::{GuardianError, ProviderError};
use crate::performance::PerformanceRecorder;
use crate::provider::Provider;
use crate::state::StateCheckpoint;

pub struct Orchestrator {
    config: GuardianConfig,
    providers: HashMap<String, Arc<dyn Provider>>,
    rate_limiter: RateLimiter,
    circuit_breakers: MultiCircuitBreaker,
    retry: RetryController<guardian_circuitbreaker::CircuitBreakerError<ProviderError>>,
    input_validator: InputValidator,
    output_validator: OutputValidator,
    quality: QualityAssessor,
    performance: PerformanceRecorder,
    checkpoint: StateCheckpoint,
    audit: AuditJournal,
    clock: Arc<dyn Clock>,
}

impl Orchestrator {
    pub fn new(config: GuardianConfig, providers: Vec<Arc<dyn Provider>>) -> Result<Self, GuardianError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let rate_limiter = RateLimiter::new(
            RateLimiterConfig::from_guardian_config(&config.rate_limiting),
            clock.now(),
        );
        let retry_config = RetryConfig::from_guardian_config(&config.retry_strategy)
            .retry_if(|e: &guardian_circuitbreaker::CircuitBreakerError<ProviderError>| match e {
                guardian_circuitbreaker::CircuitBreakerError::OpenCircuit { .. } => false,
                guardian_circuitbreaker::CircuitBreakerError::Inner(inner) => inner.is_retryable(),
            })
            .build();
        let providers = providers.into_iter().map(|p| (p.provider_name().to_string(), p)).collect();
        Ok(Self {
            checkpoint: StateCheckpoint::new(config.checkpoint_dir.clone()),
            audit: AuditJournal::new(config.audit_log_dir.clone()),
            input_validator: InputValidator::new(32_000)?,
            output_validator: OutputValidator::new(64_000)?,
            quality: QualityAssessor::new(config.monitoring.quality_alert_threshold)?,
            performance: PerformanceRecorder::new(
                config.monitoring.performance_history_capacity,
                config.monitoring.performance_anomaly_multiplier,
                config.monitoring.performance_baseline_min_samples,
            ),
            circuit_breakers: MultiCircuitBreaker::new(),
            retry: RetryController::new(retry_config),
            rate_limiter,
            providers,
            config,
            clock,
        })
    }

    fn provider(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    pub async fn execute_request(&self, ctx: RequestContext) -> Result<LlmResponse, GuardianError> {
        let _ = self.audit.log_request(&ctx).await;

        // 1. Input validation.
        let validation = self.input_validator.validate(&ctx.prompt);
        if !validation.is_valid && validation.recommended_action == guardian_core::models::RecommendedAction::Reject {
            let message = validation.issues.join("; ");
            let _ = self.audit.log_error(&ctx.request_id, &message).await;
            return Err(GuardianError::ValidationFailed(message));
        }

        // 2. Rate limit admission: global -> user -> daily quota -> session budget.
        let today = chrono::Utc::now().date_naive();
        self.rate_limiter.check_limits(&ctx.user_id, &ctx.session_id, today, Instant::now())?;

        // 3-4. Provider call through its circuit breaker and retry controller.
        match self.call_provider(&ctx.provider, &ctx).await {
            Ok(response) => self.finish_success(&ctx, response).await,
            Err(primary_error) => self.handle_failure_with_fallback(&ctx, primary_error).await,
        }
    }

    async fn call_provider(&self, provider_name: &str, ctx: &RequestContext) -> Result<LlmResponse, GuardianError> {
        let provider = self
            .provider(provider_name)
            .ok_or(GuardianError::NoProviderAvailable)?;
        let breaker = self.circuit_breakers.get_or_create(provider_name, self.clock.as_ref(), || {
            CircuitBreakerConfig::from_guardian_config(provider_name, &self.config.safety)
        });

        let clock = self.clock.as_ref();
        let result = self
            .retry
            .execute(|_attempt| {
                let provider = provider.clone();
                let ctx = ctx.clone();
                let breaker = breaker.clone();
                async move { breaker.call(clock, || provider.generate(&ctx)).await }
            })
            .await;

        result.map_err(GuardianError::RetryExhausted)
    }

    async fn finish_success(&self, ctx: &RequestContext, response: LlmResponse) -> Result<LlmResponse, GuardianError> {
        // 5. Output validation.
        let validation = self.output_validator.validate(&response.content);
        if !validation.is_valid && validation.recommended_action == guardian_core::models::RecommendedAction::Reject {
            let message = validation.issues.join("; ");
            let _ = self.audit.log_error(&ctx.request_id, &message).await;
            return Err(GuardianError::ValidationFailed(message));
        }

        // 6. Quality assessment.
        let assessment = self.quality.assess(&ctx.prompt, &response.content);
        if assessment.recommended_action == guardian_core::models::RecommendedAction::Reject {
            let message = assessment.warnings.join("; ");
            let _ = self.audit.log_error(&ctx.request_id, &message).await;
            return Err(GuardianError::QualityRejected(message));
        }

        // 7. Performance recording, then 8. cost recorded against the
        // session budget — deliberately after, mirroring the ordering in
        // `PerformanceMonitor.record_metrics` that SPEC_FULL.md's Open
        // Questions section calls out: the budget reflects actual spend only
        // once the call that incurred it has already been counted.
        self.performance.record(PerformanceMetrics {
            request_id: ctx.request_id.clone(),
            provider: response.provider.clone(),
            model: response.model.clone(),
            latency_ms: response.latency_ms,
            tokens_used: response.tokens_used,
            cost_usd: response.cost_usd,
            success: true,
            timestamp: chrono::Utc::now(),
        });
        self.rate_limiter.record_cost(&ctx.session_id, response.cost_usd);

        // 9. Audit log the response.
        let _ = self
            .audit
            .log_response(&ctx.request_id, &response.provider, &response.content, response.latency_ms)
            .await;

        Ok(response)
    }

    /// Mirrors `_handle_failure_with_fallback`: the original error is
    /// preserved even if a fallback attempt is made and also fails.
    async fn handle_failure_with_fallback(
        &self,
        ctx: &RequestContext,
        primary_error: GuardianError,
    ) -> Result<LlmResponse, GuardianError> {
        let _ = self.audit.log_error(&ctx.request_id, &primary_error.to_string()).await;

        if let Some(fallback_provider) = self.config.fallback_provider.clone() {
            if fallback_provider != ctx.provider {
                let mut fallback_ctx = ctx.clone();
                fallback_ctx.provider = fallback_provider.clone();
                fallback_ctx.model = self.config.fallback_model.clone();
                if let Ok(response) = self.call_provider(&fallback_provider, &fallback_ctx).await {
                    return self.finish_success(&fallback_ctx, response).await;
                }
            }
        }

        let _ = self
            .checkpoint
            .save(&ctx.request_id, ctx, serde_json::json!({"failed": true}))
            .await;
        Err(primary_error)
    }
}
