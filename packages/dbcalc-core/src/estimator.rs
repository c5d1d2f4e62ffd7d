//! Disk and memory estimation for dbengine instances.
//!
//! The pipeline runs in a fixed order, each quantity depending only on the
//! ones before it:
//!
//! ```text
//! nodes          = masters + replicas
//! total_points   = (metrics / interval) * retention_days * 86400
//! max_pages      = total_points / 1024
//! uncompressed   = max_pages * 4096 / 1024 / 1024           (MiB)
//! node_disk      = max(uncompressed * (1 - compression/100), 64)
//! required_disk  = node_disk * nodes
//! disk_setting   = max(required_disk / nodes, 64)
//! memory         = page_cache * nodes
//!                + nodes * metrics * 4096 * 2 / 1024 / 1024
//!                + uncompressed * 0.03
//! ```

use serde::Serialize;

use crate::error::{CalcError, Result};
use crate::format;
use crate::params::{ParameterSet, ValidParameters};

/// Uncompressed size of one dbengine page in bytes.
pub const PAGE_SIZE_BYTES: f64 = 4096.0;
/// Samples held by one uncompressed page.
pub const POINTS_PER_PAGE: f64 = 1024.0;
/// Seconds in a retention day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Smallest disk space a dbengine instance will run with, MiB.
pub const MIN_DISK_SPACE_MIB: f64 = 64.0;
/// Share of uncompressed storage held in memory as page metadata.
pub const METADATA_RATIO: f64 = 0.03;
/// Pages kept in memory per collected metric.
pub const DIMENSION_PAGES_PER_METRIC: f64 = 2.0;

/// Largest estimate accepted, MiB. Integers above 2^53 are not exact in f64.
pub const MAX_ESTIMATE_MIB: f64 = 9_007_199_254_740_992.0;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Every intermediate value of one estimation, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Derivation {
    pub nodes: u32,
    pub total_points: f64,
    pub max_pages: f64,
    pub uncompressed_storage_mib: f64,
    /// Per-instance disk after compression, before the floor
    pub node_disk_mib: f64,
    /// Per-instance disk after the 64 MiB floor
    pub node_disk_floored_mib: f64,
    pub required_disk_mib: f64,
    pub per_instance_setting_mib: f64,
    pub cache_mib: f64,
    pub dimension_pages_mib: f64,
    pub metadata_mib: f64,
    pub required_memory_mib: f64,
}

/// Rounded outputs of one estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Disk across all engine instances
    pub required_disk_mib: u64,
    /// Value for `dbengine disk space` on each instance
    pub per_instance_disk_setting_mib: u64,
    /// Memory for page cache, dimension pages and metadata
    pub required_memory_mib: u64,
    /// Ready-to-paste configuration block
    pub config_snippet: String,
}

/// Stateless capacity estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityEstimator;

impl CapacityEstimator {
    /// Runs the derivation pipeline without rounding anything.
    pub fn derive(params: &ValidParameters) -> Derivation {
        let p = params.params();
        let nodes = params.node_count();
        let nodes_f = f64::from(nodes);

        let total_points =
            (p.metric_count / p.collection_interval_secs) * p.retention_days * SECONDS_PER_DAY;
        let max_pages = total_points / POINTS_PER_PAGE;
        let uncompressed_storage_mib = max_pages * (PAGE_SIZE_BYTES / BYTES_PER_MIB);

        let node_disk_mib =
            uncompressed_storage_mib * (1.0 - p.compression_savings_percent / 100.0);
        let node_disk_floored_mib = floor_disk(node_disk_mib);

        // One instance per master plus one per replica hosted on the master.
        let required_disk_mib = node_disk_floored_mib * nodes_f;
        // Algebraically equal to node_disk_floored_mib; rounded separately.
        let per_instance_setting_mib = floor_disk(required_disk_mib / nodes_f);

        let cache_mib = p.page_cache_mib * nodes_f;
        let dimension_pages_mib = (nodes_f * p.metric_count) * PAGE_SIZE_BYTES
            * DIMENSION_PAGES_PER_METRIC
            / BYTES_PER_MIB;
        let metadata_mib = uncompressed_storage_mib * METADATA_RATIO;
        let required_memory_mib = cache_mib + dimension_pages_mib + metadata_mib;

        Derivation {
            nodes,
            total_points,
            max_pages,
            uncompressed_storage_mib,
            node_disk_mib,
            node_disk_floored_mib,
            required_disk_mib,
            per_instance_setting_mib,
            cache_mib,
            dimension_pages_mib,
            metadata_mib,
            required_memory_mib,
        }
    }

    /// Estimates disk, memory and the per-instance setting.
    pub fn compute(params: &ValidParameters) -> ResultSet {
        let d = Self::derive(params);
        tracing::debug!(
            nodes = d.nodes,
            uncompressed_mib = d.uncompressed_storage_mib,
            node_disk_mib = d.node_disk_mib,
            required_disk_mib = d.required_disk_mib,
            required_memory_mib = d.required_memory_mib,
            "derived dbengine capacity"
        );
        Self::round(&d)
    }

    /// Validates `params` and estimates in one step.
    pub fn compute_raw(params: &ParameterSet) -> Result<ResultSet> {
        let valid = params.validate()?;
        Ok(Self::compute(&valid))
    }

    fn round(d: &Derivation) -> ResultSet {
        let per_instance = round_mib(d.per_instance_setting_mib);
        ResultSet {
            required_disk_mib: round_mib(d.required_disk_mib),
            per_instance_disk_setting_mib: per_instance,
            required_memory_mib: round_mib(d.required_memory_mib),
            config_snippet: format::config_snippet(per_instance),
        }
    }
}

/// Rejects derivations whose quantities are not finite or exceed
/// [`MAX_ESTIMATE_MIB`], so rounding never sees NaN or saturates.
pub(crate) fn check_bounds(d: &Derivation) -> Result<()> {
    let checks = [
        ("total points", d.total_points, f64::MAX),
        ("uncompressed storage", d.uncompressed_storage_mib, MAX_ESTIMATE_MIB),
        ("node disk space", d.node_disk_mib, f64::MAX),
        ("required disk space", d.required_disk_mib, MAX_ESTIMATE_MIB),
        ("disk space setting", d.per_instance_setting_mib, MAX_ESTIMATE_MIB),
        ("required memory", d.required_memory_mib, MAX_ESTIMATE_MIB),
    ];
    for (quantity, value, limit) in checks {
        if !value.is_finite() || value > limit {
            return Err(CalcError::invalid(
                "workload",
                format!("{} of {} is out of range", quantity, value),
            ));
        }
    }
    Ok(())
}

fn floor_disk(mib: f64) -> f64 {
    if mib < MIN_DISK_SPACE_MIB {
        MIN_DISK_SPACE_MIB
    } else {
        mib
    }
}

/// Rounds half toward positive infinity (2.5 -> 3, 329.5 -> 330).
pub(crate) fn round_mib(mib: f64) -> u64 {
    let rounded = (mib + 0.5).floor();
    if rounded <= 0.0 {
        0
    } else {
        rounded as u64
    }
}
