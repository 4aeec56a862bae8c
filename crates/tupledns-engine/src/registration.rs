//! Publishing and withdrawing node records.
//!
//! Registration is two publishes under the coordinate name: the
//! address record, then the capability record. The capability record
//! is always published, even for an empty set, so re-registering a
//! coordinate replaces both records (last-writer-wins, no capability
//! merge). Transient substrate failures are retried with doubling
//! backoff; validation failures are permanent and never retried.

use crate::config::EngineConfig;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;
use tupledns_core::{CapabilitySet, Coordinate, TupleError};
use tupledns_substrate::{RecordType, Substrate, SubstrateError, format_capability_record};

pub(crate) fn map_substrate_error(error: SubstrateError) -> TupleError {
    match error {
        SubstrateError::Timeout => TupleError::Timeout,
        SubstrateError::NotFound => TupleError::NoResults,
        other => TupleError::QueryFailed(other.to_string()),
    }
}

pub(crate) async fn register(
    substrate: &Arc<dyn Substrate>,
    config: &EngineConfig,
    coordinate: &Coordinate,
    address: IpAddr,
    capabilities: &CapabilitySet,
    ttl: u32,
) -> Result<(), TupleError> {
    if ttl == 0 {
        return Err(TupleError::InvalidParameter(
            "ttl must be positive".to_string(),
        ));
    }

    let name = coordinate.to_string();
    publish_with_retry(
        substrate,
        config,
        &name,
        RecordType::Address,
        &address.to_string(),
        ttl,
    )
    .await?;
    publish_with_retry(
        substrate,
        config,
        &name,
        RecordType::Capabilities,
        &format_capability_record(capabilities),
        ttl,
    )
    .await?;

    debug!(coordinate = %name, ttl, capabilities = capabilities.len(), "registered node");
    Ok(())
}

pub(crate) async fn unregister(
    substrate: &Arc<dyn Substrate>,
    config: &EngineConfig,
    coordinate: &Coordinate,
) -> Result<(), TupleError> {
    let name = coordinate.to_string();
    let mut backoff = config.retry_backoff;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match substrate.withdraw(&name).await {
            // Withdrawing an absent name is not an error.
            Ok(()) | Err(SubstrateError::NotFound) => {
                debug!(coordinate = %name, "withdrew node");
                return Ok(());
            }
            Err(error) if error.is_transient() && attempt < config.register_attempts => {
                debug!(coordinate = %name, attempt, %error, "withdraw retry");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(error) => return Err(map_substrate_error(error)),
        }
    }
}

async fn publish_with_retry(
    substrate: &Arc<dyn Substrate>,
    config: &EngineConfig,
    name: &str,
    record_type: RecordType,
    value: &str,
    ttl: u32,
) -> Result<(), TupleError> {
    let mut backoff = config.retry_backoff;
    let mut attempt = 0;
    loop {
        attempt += 1;
        match substrate.publish(name, record_type, value, ttl).await {
            Ok(()) => return Ok(()),
            Err(error) if error.is_transient() && attempt < config.register_attempts => {
                debug!(coordinate = %name, %record_type, attempt, %error, "publish retry");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(error) => return Err(map_substrate_error(error)),
        }
    }
}
