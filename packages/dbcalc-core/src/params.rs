//! Workload parameters and boundary validation.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::estimator::{self, CapacityEstimator};

/// Workload description supplied by the user.
///
/// Values are taken as entered; nothing is checked until [`ParameterSet::validate`]
/// runs. Every field falls back to its default when absent from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Primary collecting nodes (>= 1)
    #[serde(alias = "master", alias = "masters")]
    pub master_count: u32,
    /// Streaming nodes feeding the primaries
    #[serde(alias = "slaves", alias = "replicas")]
    pub replica_count: u32,
    /// Average metrics collected per node
    #[serde(alias = "dims", alias = "metrics")]
    pub metric_count: f64,
    /// Average seconds between samples (> 0)
    #[serde(alias = "update", alias = "interval")]
    pub collection_interval_secs: f64,
    /// Days of history to keep
    #[serde(alias = "retention")]
    pub retention_days: f64,
    /// Expected compression savings, nominally 0..=100
    #[serde(alias = "compression")]
    pub compression_savings_percent: f64,
    /// Page cache size per engine instance, MiB
    #[serde(alias = "page_cache", alias = "pageSize")]
    pub page_cache_mib: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            master_count: 1,
            replica_count: 0,
            metric_count: 2000.0,
            collection_interval_secs: 1.0,
            retention_days: 1.0,
            compression_savings_percent: 50.0,
            page_cache_mib: 32.0,
        }
    }
}

/// A named workload field, as addressed from text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    MasterCount,
    ReplicaCount,
    MetricCount,
    CollectionIntervalSecs,
    RetentionDays,
    CompressionSavingsPercent,
    PageCacheMib,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::MasterCount,
        Field::ReplicaCount,
        Field::MetricCount,
        Field::CollectionIntervalSecs,
        Field::RetentionDays,
        Field::CompressionSavingsPercent,
        Field::PageCacheMib,
    ];

    /// Name used in config files and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Field::MasterCount => "master_count",
            Field::ReplicaCount => "replica_count",
            Field::MetricCount => "metric_count",
            Field::CollectionIntervalSecs => "collection_interval_secs",
            Field::RetentionDays => "retention_days",
            Field::CompressionSavingsPercent => "compression_savings_percent",
            Field::PageCacheMib => "page_cache_mib",
        }
    }

    /// Short names from the calculator form.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::MasterCount => &["master", "masters"],
            Field::ReplicaCount => &["replicas", "slaves"],
            Field::MetricCount => &["metrics", "dims"],
            Field::CollectionIntervalSecs => &["interval", "update"],
            Field::RetentionDays => &["retention"],
            Field::CompressionSavingsPercent => &["compression"],
            Field::PageCacheMib => &["page_cache", "pageSize"],
        }
    }

    /// Looks a field up by name or alias, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<Field> {
        let name = name.trim();
        Field::ALL.into_iter().find(|field| {
            field.name().eq_ignore_ascii_case(name)
                || field.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }
}

fn parse_number(field: Field, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| CalcError::NotANumber {
            field: field.name(),
            value: raw.to_string(),
        })
}

fn parse_count(field: Field, raw: &str) -> Result<u32> {
    if let Ok(count) = raw.trim().parse::<u32>() {
        return Ok(count);
    }
    let value = parse_number(field, raw)?;
    Err(CalcError::invalid(
        field.name(),
        format!("{} is not a non-negative whole number", value),
    ))
}

impl ParameterSet {
    /// Updates one field from free-form text, as typed into a form or
    /// passed through the environment.
    ///
    /// Only parsing happens here; domain checks are left to [`Self::validate`].
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<()> {
        let field = Field::lookup(name).ok_or_else(|| CalcError::UnknownField(name.to_string()))?;
        match field {
            Field::MasterCount => self.master_count = parse_count(field, raw)?,
            Field::ReplicaCount => self.replica_count = parse_count(field, raw)?,
            Field::MetricCount => self.metric_count = parse_number(field, raw)?,
            Field::CollectionIntervalSecs => {
                self.collection_interval_secs = parse_number(field, raw)?
            }
            Field::RetentionDays => self.retention_days = parse_number(field, raw)?,
            Field::CompressionSavingsPercent => {
                self.compression_savings_percent = parse_number(field, raw)?
            }
            Field::PageCacheMib => self.page_cache_mib = parse_number(field, raw)?,
        }
        Ok(())
    }

    /// Checks every field against its domain, then checks that the derived
    /// estimates are finite and fit the output range.
    ///
    /// Compression outside 0..=100 is accepted with a warning.
    pub fn validate(&self) -> Result<ValidParameters> {
        if self.master_count == 0 {
            return Err(CalcError::invalid("master_count", "at least one master node is required"));
        }
        if self.master_count.checked_add(self.replica_count).is_none() {
            return Err(CalcError::invalid(
                "replica_count",
                format!(
                    "{} masters plus {} replicas overflows the node count",
                    self.master_count, self.replica_count
                ),
            ));
        }

        check_finite("metric_count", self.metric_count)?;
        check_finite("collection_interval_secs", self.collection_interval_secs)?;
        check_finite("retention_days", self.retention_days)?;
        check_finite("compression_savings_percent", self.compression_savings_percent)?;
        check_finite("page_cache_mib", self.page_cache_mib)?;

        check_non_negative("metric_count", self.metric_count)?;
        check_non_negative("retention_days", self.retention_days)?;
        check_non_negative("page_cache_mib", self.page_cache_mib)?;

        if self.collection_interval_secs <= 0.0 {
            return Err(CalcError::invalid(
                "collection_interval_secs",
                format!("{} must be greater than zero", self.collection_interval_secs),
            ));
        }

        if !(0.0..=100.0).contains(&self.compression_savings_percent) {
            tracing::warn!(
                compression = self.compression_savings_percent,
                "compression savings outside 0-100%"
            );
        }

        let candidate = ValidParameters(*self);
        estimator::check_bounds(&CapacityEstimator::derive(&candidate))?;
        Ok(candidate)
    }

    /// Total engine instances: one per master plus one per replica.
    ///
    /// Saturates for unvalidated sets; [`Self::validate`] rejects overflow.
    pub fn node_count(&self) -> u32 {
        self.master_count.saturating_add(self.replica_count)
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid(field, format!("{} is not a finite number", value)))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value < 0.0 {
        Err(CalcError::invalid(field, format!("{} must not be negative", value)))
    } else {
        Ok(())
    }
}

/// A [`ParameterSet`] that passed [`ParameterSet::validate`].
///
/// The estimator only accepts this type, so division by a zero interval
/// or a zero node count cannot reach the formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidParameters(ParameterSet);

impl ValidParameters {
    pub fn params(&self) -> &ParameterSet {
        &self.0
    }

    pub fn node_count(&self) -> u32 {
        self.0.node_count()
    }
}

impl TryFrom<ParameterSet> for ValidParameters {
    type Error = CalcError;

    fn try_from(params: ParameterSet) -> Result<Self> {
        params.validate()
    }
}
