//! Shared fixtures for engine integration tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use analyzer::{EngineConfig, ProviderClient};
use shared::{BusinessRecord, ProviderFailure, ProviderId, ProviderModel};

/// How the stub provider answers every call
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Every call fails the same way
    Fail(ProviderFailure),
    /// Calls succeed but the text contains no JSON object
    Garbage,
    /// Calls succeed with a well-formed payload at this score
    Score(f64),
    /// First `n` calls fail retryably, then succeed at this score
    FailTimes(u32, f64),
}

/// In-process provider double with per-provider overrides and latency
/// injection. Clones share one call counter, so a test can keep a
/// handle after the engine takes ownership.
#[derive(Clone)]
pub struct StubProviderClient {
    behavior: Behavior,
    overrides: HashMap<ProviderId, Behavior>,
    calls: Arc<AtomicU32>,
    delays: HashMap<ProviderId, Duration>,
}

impl StubProviderClient {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            overrides: HashMap::new(),
            calls: Arc::new(AtomicU32::new(0)),
            delays: HashMap::new(),
        }
    }

    pub fn with_provider_behavior(mut self, provider: ProviderId, behavior: Behavior) -> Self {
        self.overrides.insert(provider, behavior);
        self
    }

    pub fn with_delay(mut self, provider: ProviderId, delay: Duration) -> Self {
        self.delays.insert(provider, delay);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for StubProviderClient {
    async fn complete(&self, model: &ProviderModel, _prompt: &str) -> Result<String, ProviderFailure> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&model.provider) {
            tokio::time::sleep(*delay).await;
        }

        let behavior = self.overrides.get(&model.provider).unwrap_or(&self.behavior);
        match behavior {
            Behavior::Fail(failure) => Err(failure.clone()),
            Behavior::Garbage => Ok("I am unable to provide structured output today.".to_string()),
            Behavior::Score(score) => Ok(payload(*score)),
            Behavior::FailTimes(n, score) => {
                if call < *n {
                    Err(ProviderFailure::RateLimited)
                } else {
                    Ok(payload(*score))
                }
            }
        }
    }
}

fn payload(score: f64) -> String {
    format!("{{\"score\": {score}, \"findings\": [\"stub finding\"]}}")
}

/// $2.8M ask, $1.0M profit fixture used across the suite
pub fn hvac_record() -> BusinessRecord {
    BusinessRecord {
        id: Uuid::new_v4(),
        name: "Hill Country HVAC".to_string(),
        sector: "home services".to_string(),
        location: "Austin, TX".to_string(),
        asking_price: 2_800_000.0,
        annual_revenue: 3_500_000.0,
        annual_profit: 1_000_000.0,
    }
}

pub fn record_named(name: &str) -> BusinessRecord {
    BusinessRecord {
        name: name.to_string(),
        ..hvac_record()
    }
}

/// Config with negligible delays so tests run fast
pub fn fast_config() -> EngineConfig {
    EngineConfig {
        max_attempts: 3,
        retry_base_delay: Duration::from_millis(1),
        batch_size: 2,
        batch_delay: Duration::from_millis(1),
        ..EngineConfig::default()
    }
}
