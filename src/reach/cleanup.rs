//! Removal of unreachable mappings.
//!
//! Computing the plan never mutates anything, so a caller can show it, ask
//! for confirmation, and only then apply it.

use tracing::{info, warn};

use super::{validate_store, ProbeOptions, ValidationResult};
use crate::entries::{EntryStore, StoreError, StoreResult};

/// Results that are deletion candidates: unreachable file entries.
pub fn cleanup_candidates(results: &[ValidationResult]) -> Vec<ValidationResult> {
    results
        .iter()
        .filter(|r| !r.entry.is_symlink() && !r.reachable)
        .cloned()
        .collect()
}

/// List, validate, and filter in one step.
pub async fn plan_cleanup(
    store: &EntryStore,
    options: ProbeOptions,
) -> StoreResult<Vec<ValidationResult>> {
    let results = validate_store(store, options).await?;
    Ok(cleanup_candidates(&results))
}

/// What applying a cleanup plan did.
#[derive(Debug, Default)]
pub struct CleanupOutcome {
    /// Domains removed.
    pub deleted: Vec<String>,
    /// Domains that could not be removed, with the reason.
    pub failed: Vec<(String, StoreError)>,
}

impl CleanupOutcome {
    /// True when every candidate was removed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete every candidate. One failure does not stop the rest.
pub fn apply_cleanup(store: &EntryStore, candidates: &[ValidationResult]) -> CleanupOutcome {
    let mut outcome = CleanupOutcome::default();
    for candidate in candidates {
        let domain = &candidate.entry.domain;
        match store.delete(domain) {
            Ok(()) => outcome.deleted.push(domain.clone()),
            Err(e) => {
                warn!("Failed to delete {}: {}", domain, e);
                outcome.failed.push((domain.clone(), e));
            }
        }
    }
    info!(
        "Cleanup removed {} entries, {} failures",
        outcome.deleted.len(),
        outcome.failed.len()
    );
    outcome
}
