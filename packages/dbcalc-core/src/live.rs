//! Recompute-on-change binding for interactive front ends.
//!
//! Every accepted submission gets a generation number. Snapshots are
//! published through `ArcSwapOption` so readers never block, and a snapshot
//! is only replaced by one with a higher generation: when submissions race,
//! the most recently submitted parameters win.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::error::Result;
use crate::estimator::{CapacityEstimator, ResultSet};
use crate::params::ParameterSet;

/// One published estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Submission order, starting at 1
    pub generation: u64,
    pub params: ParameterSet,
    pub result: ResultSet,
}

/// Latest estimate for a stream of parameter changes.
#[derive(Debug, Default)]
pub struct LiveEstimate {
    next_generation: AtomicU64,
    current: ArcSwapOption<Snapshot>,
}

impl LiveEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and estimates `params`, then publishes the result unless a
    /// later submission already has.
    ///
    /// Invalid parameters are rejected without touching the published
    /// snapshot. Returns the snapshot computed for this call.
    pub fn submit(&self, params: ParameterSet) -> Result<Arc<Snapshot>> {
        let valid = params.validate()?;
        let generation = self.next_generation.fetch_add(1, Ordering::AcqRel) + 1;

        let snapshot = Arc::new(Snapshot {
            generation,
            params,
            result: CapacityEstimator::compute(&valid),
        });

        let previous = self.current.rcu(|current| match current {
            Some(existing) if existing.generation > generation => Some(Arc::clone(existing)),
            _ => Some(Arc::clone(&snapshot)),
        });

        match previous.as_ref() {
            Some(existing) if existing.generation > generation => {
                tracing::trace!(
                    generation,
                    newer = existing.generation,
                    "estimate superseded before publish"
                );
            }
            _ => tracing::debug!(generation, "published estimate"),
        }

        Ok(snapshot)
    }

    /// Current published snapshot, if anything was accepted yet.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    /// Number of accepted submissions.
    pub fn submissions(&self) -> u64 {
        self.next_generation.load(Ordering::Acquire)
    }
}
