//! Engine tuning knobs.

use std::time::Duration;
use tupledns_core::TupleError;

/// Configuration for one [`TupleDns`](crate::TupleDns) handle.
///
/// Defaults match the protocol's reference values: a 5 second
/// per-sub-query deadline and at most 16 concurrent substrate queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deadline applied to each sub-query individually.
    pub query_timeout: Duration,

    /// Upper bound on concurrently outstanding substrate queries per
    /// `find` call.
    pub max_concurrent: usize,

    /// Publish/withdraw attempts on transient substrate failure.
    pub register_attempts: u32,

    /// Initial backoff between registration attempts; doubles per retry.
    pub retry_backoff: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(5),
            max_concurrent: 16,
            register_attempts: 3,
            retry_backoff: Duration::from_millis(100),
        }
    }
}

impl EngineConfig {
    pub(crate) fn validate(&self) -> Result<(), TupleError> {
        if self.max_concurrent == 0 {
            return Err(TupleError::InvalidParameter(
                "max_concurrent must be at least 1".to_string(),
            ));
        }
        if self.register_attempts == 0 {
            return Err(TupleError::InvalidParameter(
                "register_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
