//! Reachability checks for mapped services.
//!
//! Every file entry is dialed once over TCP; symlink entries are not network
//! endpoints and always count as reachable. Unreachable entries are data, not
//! errors: a batch never fails as a whole.
//!
//! Probes run concurrently on a bounded pool. Concurrency only changes
//! latency; results come back in input order.

mod cleanup;
mod probe;

pub use cleanup::{apply_cleanup, cleanup_candidates, plan_cleanup, CleanupOutcome};
pub use probe::tcp_reachable;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::DEFAULT_TIMEOUT_MS;
use crate::entries::{Entry, EntryStore, StoreResult};

pub use crate::config::DEFAULT_CONCURRENCY;

/// Reason reported when the TCP dial fails or times out.
pub const CONNECTION_FAILED: &str = "connection failed";

/// Default dial timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// Outcome of validating one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// The entry that was checked.
    #[serde(flatten)]
    pub entry: Entry,
    /// Whether the mapped endpoint accepted a connection.
    pub reachable: bool,
    /// Why the entry is unreachable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationResult {
    fn reachable(entry: Entry) -> Self {
        Self {
            entry,
            reachable: true,
            reason: None,
        }
    }

    fn unreachable(entry: Entry, reason: impl Into<String>) -> Self {
        Self {
            entry,
            reachable: false,
            reason: Some(reason.into()),
        }
    }
}

/// Probe settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Per-dial timeout.
    pub timeout: Duration,
    /// Maximum probes in flight.
    pub concurrency: usize,
}

impl ProbeOptions {
    /// Options with the given timeout and default concurrency.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Validate `entries`, one result per entry in input order.
pub async fn validate_entries(entries: &[Entry], options: ProbeOptions) -> Vec<ValidationResult> {
    let permits = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let mut results: Vec<Option<ValidationResult>> = vec![None; entries.len()];
    let mut probes = JoinSet::new();

    for (idx, entry) in entries.iter().enumerate() {
        if entry.is_symlink() {
            results[idx] = Some(ValidationResult::reachable(entry.clone()));
            continue;
        }
        let mapping = match entry.parsed_mapping() {
            Ok(mapping) => mapping,
            Err(e) => {
                results[idx] = Some(ValidationResult::unreachable(entry.clone(), e.to_string()));
                continue;
            }
        };

        let entry = entry.clone();
        let permits = Arc::clone(&permits);
        let timeout = options.timeout;
        probes.spawn(async move {
            let _permit = permits.acquire_owned().await.ok();
            let (host, port) = mapping.addr();
            let result = if tcp_reachable(host, port, timeout).await {
                ValidationResult::reachable(entry)
            } else {
                ValidationResult::unreachable(entry, CONNECTION_FAILED)
            };
            (idx, result)
        });
    }

    while let Some(joined) = probes.join_next().await {
        match joined {
            Ok((idx, result)) => results[idx] = Some(result),
            Err(e) => warn!("Probe task failed: {}", e),
        }
    }

    let results: Vec<ValidationResult> = results
        .into_iter()
        .zip(entries)
        .map(|(result, entry)| {
            result.unwrap_or_else(|| ValidationResult::unreachable(entry.clone(), "probe aborted"))
        })
        .collect();

    debug!(
        "Validated {} entries, {} unreachable",
        results.len(),
        results.iter().filter(|r| !r.reachable).count()
    );
    results
}

/// List the store and validate everything in it.
pub async fn validate_store(
    store: &EntryStore,
    options: ProbeOptions,
) -> StoreResult<Vec<ValidationResult>> {
    let entries = store.list()?;
    Ok(validate_entries(&entries, options).await)
}
