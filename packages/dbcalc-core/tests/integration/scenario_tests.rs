//! Reference workloads with locked outputs.

use dbcalc_core::{CapacityEstimator, ParameterSet, ResultSet};
use pretty_assertions::assert_eq;

fn scenario_a() -> ParameterSet {
    ParameterSet {
        master_count: 1,
        replica_count: 0,
        metric_count: 2000.0,
        collection_interval_secs: 1.0,
        retention_days: 1.0,
        compression_savings_percent: 50.0,
        page_cache_mib: 32.0,
    }
}

fn compute(params: ParameterSet) -> ResultSet {
    CapacityEstimator::compute(&params.validate().unwrap())
}

#[test]
fn test_scenario_a_single_node() {
    assert_eq!(
        compute(scenario_a()),
        ResultSet {
            required_disk_mib: 330,
            per_instance_disk_setting_mib: 330,
            required_memory_mib: 67,
            config_snippet: "[global]\n    dbengine disk space = 330".to_string(),
        }
    );
}

#[test]
fn test_scenario_b_three_replicas() {
    let params = ParameterSet {
        replica_count: 3,
        ..scenario_a()
    };
    let valid = params.validate().unwrap();
    let a = CapacityEstimator::derive(&scenario_a().validate().unwrap());
    let result = CapacityEstimator::compute(&valid);

    // Total uses the unrounded per-instance value: 4 * 329.59 = 1318.36.
    assert_eq!(
        result.required_disk_mib,
        (4.0 * a.node_disk_floored_mib).round() as u64
    );
    assert_eq!(result.required_disk_mib, 1318);
    assert_eq!(result.per_instance_disk_setting_mib, 330);
    assert_eq!(result.required_memory_mib, 210);
    assert!(result.config_snippet.ends_with("dbengine disk space = 330"));
}

#[test]
fn test_full_compression_pins_floor() {
    for replicas in [0u32, 1, 5] {
        let params = ParameterSet {
            replica_count: replicas,
            compression_savings_percent: 100.0,
            ..scenario_a()
        };
        let result = compute(params);
        assert_eq!(result.per_instance_disk_setting_mib, 64);
        assert_eq!(result.required_disk_mib, 64 * u64::from(replicas + 1));
    }
}

#[test]
fn test_week_of_retention_at_ten_seconds() {
    // 3000 metrics / 10 s * 7 days = 181,440,000 points -> 692.2 MiB raw.
    let params = ParameterSet {
        metric_count: 3000.0,
        collection_interval_secs: 10.0,
        retention_days: 7.0,
        compression_savings_percent: 70.0,
        page_cache_mib: 64.0,
        ..scenario_a()
    };
    let valid = params.validate().unwrap();
    let d = CapacityEstimator::derive(&valid);
    assert!((d.uncompressed_storage_mib - 692.138671875).abs() < 1e-9);

    let result = CapacityEstimator::compute(&valid);
    // 692.138671875 * 0.3 = 207.64
    assert_eq!(result.required_disk_mib, 208);
    assert_eq!(result.per_instance_disk_setting_mib, 208);
    // 64 + 23.4375 + 20.76 = 108.2
    assert_eq!(result.required_memory_mib, 108);
}

#[test]
fn test_multiple_masters_count_as_instances() {
    let params = ParameterSet {
        master_count: 2,
        replica_count: 2,
        ..scenario_a()
    };
    let result = compute(params);
    assert_eq!(result.required_disk_mib, 1318);
    assert_eq!(result.per_instance_disk_setting_mib, 330);
}

#[test]
fn test_compute_raw_matches_compute() {
    let raw = CapacityEstimator::compute_raw(&scenario_a()).unwrap();
    assert_eq!(raw, compute(scenario_a()));
}
