//! Where alerts come from.
//!
//! Each fetch returns a complete replacement list. The only source shipped
//! is [`SimulatedSource`], which serves the sample catalog after a delay.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;

use crate::alert::{sample_alerts, Alert};
use crate::error::SourceError;
use crate::storage::Config;

#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fetch the full current alert list.
    async fn fetch(&self) -> Result<Vec<Alert>, SourceError>;
}

/// Serves the sample catalog, timestamped at fetch time.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    latency: Duration,
    failure_rate: f64,
}

impl SimulatedSource {
    pub fn new(latency: Duration, failure_rate: f64) -> Self {
        Self {
            latency,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fetch_latency(), config.failure_rate())
    }

    /// No delay, never fails.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, 0.0)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(800), 0.0)
    }
}

#[async_trait]
impl AlertSource for SimulatedSource {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn fetch(&self) -> Result<Vec<Alert>, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate) {
            return Err(SourceError::Unavailable("simulated feed outage".into()));
        }
        Ok(sample_alerts(Utc::now()))
    }
}
