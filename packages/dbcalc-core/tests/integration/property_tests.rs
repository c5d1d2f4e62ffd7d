//! Invariants over the valid parameter domain.

use dbcalc_core::{CalcError, CapacityEstimator, ParameterSet, ResultSet};
use proptest::prelude::*;

fn workload() -> impl Strategy<Value = ParameterSet> {
    (
        1u32..8,
        0u32..16,
        0.0f64..50_000.0,
        0.5f64..60.0,
        0.0f64..365.0,
        0.0f64..=100.0,
        0.0f64..4096.0,
    )
        .prop_map(
            |(masters, replicas, metrics, interval, retention, compression, cache)| ParameterSet {
                master_count: masters,
                replica_count: replicas,
                metric_count: metrics,
                collection_interval_secs: interval,
                retention_days: retention,
                compression_savings_percent: compression,
                page_cache_mib: cache,
            },
        )
}

/// Wide magnitudes, including workloads that overflow the formulas.
fn extreme_workload() -> impl Strategy<Value = ParameterSet> {
    (
        1u32..1_000,
        0u32..100_000,
        0.0f64..1e12,
        1e-6f64..60.0,
        0.0f64..36_500.0,
        -1_000.0f64..1_000.0,
        0.0f64..1e9,
    )
        .prop_map(
            |(masters, replicas, metrics, interval, retention, compression, cache)| ParameterSet {
                master_count: masters,
                replica_count: replicas,
                metric_count: metrics,
                collection_interval_secs: interval,
                retention_days: retention,
                compression_savings_percent: compression,
                page_cache_mib: cache,
            },
        )
}

fn compute(params: ParameterSet) -> ResultSet {
    CapacityEstimator::compute(&params.validate().unwrap())
}

proptest! {
    #[test]
    fn disk_never_below_floor(params in workload()) {
        let result = compute(params);
        prop_assert!(result.required_disk_mib >= 64);
        prop_assert!(result.per_instance_disk_setting_mib >= 64);
    }

    #[test]
    fn compute_is_idempotent(params in workload()) {
        prop_assert_eq!(compute(params), compute(params));
    }

    #[test]
    fn disk_grows_with_nodes(params in workload(), extra in 1u32..8) {
        let more = ParameterSet { replica_count: params.replica_count + extra, ..params };
        prop_assert!(compute(more).required_disk_mib >= compute(params).required_disk_mib);
    }

    #[test]
    fn disk_grows_with_metrics(params in workload(), extra in 0.0f64..10_000.0) {
        let more = ParameterSet { metric_count: params.metric_count + extra, ..params };
        prop_assert!(compute(more).required_disk_mib >= compute(params).required_disk_mib);
    }

    #[test]
    fn disk_grows_with_retention(params in workload(), extra in 0.0f64..30.0) {
        let more = ParameterSet { retention_days: params.retention_days + extra, ..params };
        prop_assert!(compute(more).required_disk_mib >= compute(params).required_disk_mib);
    }

    #[test]
    fn disk_shrinks_with_compression(params in workload(), other in 0.0f64..=100.0) {
        let (low, high) = if other < params.compression_savings_percent {
            (other, params.compression_savings_percent)
        } else {
            (params.compression_savings_percent, other)
        };
        let less = compute(ParameterSet { compression_savings_percent: low, ..params });
        let more = compute(ParameterSet { compression_savings_percent: high, ..params });
        prop_assert!(more.required_disk_mib <= less.required_disk_mib);
    }

    #[test]
    fn snippet_embeds_integer_setting(params in workload()) {
        let result = compute(params);
        let expected = format!("dbengine disk space = {}", result.per_instance_disk_setting_mib);
        prop_assert!(result.config_snippet.starts_with("[global]\n"));
        prop_assert!(result.config_snippet.ends_with(&expected));
        prop_assert!(!result.config_snippet.contains('.'));
    }

    #[test]
    fn setting_tracks_floored_node_disk(params in workload()) {
        let valid = params.validate().unwrap();
        let d = CapacityEstimator::derive(&valid);
        let result = CapacityEstimator::compute(&valid);
        let expected = (d.node_disk_floored_mib + 0.5).floor() as u64;
        prop_assert_eq!(result.per_instance_disk_setting_mib, expected);
    }

    #[test]
    fn extreme_workloads_rejected_or_floored(params in extreme_workload()) {
        match params.validate() {
            Ok(valid) => {
                let result = CapacityEstimator::compute(&valid);
                prop_assert!(result.required_disk_mib >= 64);
                prop_assert!(result.per_instance_disk_setting_mib >= 64);
                prop_assert!(result.required_disk_mib < u64::MAX);
                prop_assert!(result.required_memory_mib < u64::MAX);
            }
            Err(err) => {
                let is_invalid_input = matches!(err, CalcError::InvalidInput { .. });
                prop_assert!(is_invalid_input, "unexpected error {:?}", err);
            }
        }
    }
}
