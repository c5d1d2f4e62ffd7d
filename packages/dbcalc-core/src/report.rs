//! Human-readable and JSON presentation of an estimate.

use std::fmt;

use serde::Serialize;

use crate::error::{CalcError, Result};
use crate::estimator::ResultSet;
use crate::format::{format_mib, plural, DISK_SPACE_KEY};
use crate::params::{ParameterSet, ValidParameters};

/// An estimate paired with the workload it was computed for.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub params: &'a ParameterSet,
    pub result: &'a ResultSet,
}

impl<'a> Report<'a> {
    pub fn new(params: &'a ValidParameters, result: &'a ResultSet) -> Self {
        Self {
            params: params.params(),
            result,
        }
    }

    fn has_replicas(&self) -> bool {
        self.params.replica_count > 0
    }

    /// Serializes parameters and results as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CalcError::SerializationError(e.to_string()))
    }

    fn write_storage_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.params;
        let days = p.retention_days;
        let disk = format_mib(self.result.required_disk_mib);
        if self.has_replicas() {
            writeln!(
                f,
                "Your Agent now stores metrics for {} nodes ({} master{} and {} replica{}) \
                 for {} day{} using a total of {} in disk space.",
                p.node_count(),
                p.master_count,
                plural(f64::from(p.master_count)),
                p.replica_count,
                plural(f64::from(p.replica_count)),
                days,
                plural(days),
                disk
            )
        } else {
            writeln!(
                f,
                "Your Agent now stores metrics for {} day{} using a total of {} in disk space.",
                days,
                plural(days),
                disk
            )
        }
    }

    fn write_notes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.params;
        let r = self.result;
        writeln!(f, "Notes:")?;
        if self.has_replicas() {
            writeln!(
                f,
                "  - Your master node creates a separate database engine instance for each \
                 replica and allocates {} to each of them, so total disk exceeds the \
                 `{}` setting.",
                format_mib(r.per_instance_disk_setting_mib),
                DISK_SPACE_KEY
            )?;
            writeln!(
                f,
                "    {} per instance * {} instances ({} master{}, {} replica{}) = {}",
                format_mib(r.per_instance_disk_setting_mib),
                p.node_count(),
                p.master_count,
                plural(f64::from(p.master_count)),
                p.replica_count,
                plural(f64::from(p.replica_count)),
                format_mib(r.required_disk_mib)
            )?;
        }
        writeln!(
            f,
            "  - The database engine requires a minimum of 64 MiB to function (`{}`).",
            DISK_SPACE_KEY
        )?;
        writeln!(
            f,
            "  - The memory figure covers only the database engine and may be higher in \
             practice due to fragmentation; collection, visualization and alerting need more."
        )
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_master = if self.has_replicas() {
            " on your master node"
        } else {
            ""
        };

        writeln!(
            f,
            "With the above configuration, you should allocate the following resources \
             to metrics storage{}:",
            on_master
        )?;
        writeln!(
            f,
            "  {} in total disk space",
            format_mib(self.result.required_disk_mib)
        )?;
        writeln!(
            f,
            "  {} in system memory",
            format_mib(self.result.required_memory_mib)
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "To enable this setup, edit netdata.conf{} and change the `{}` setting to:",
            on_master, DISK_SPACE_KEY
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.result.config_snippet)?;
        writeln!(f)?;
        writeln!(f, "Restart your Agent for the setting to take effect.")?;
        self.write_storage_summary(f)?;
        writeln!(f)?;
        self.write_notes(f)
    }
}
