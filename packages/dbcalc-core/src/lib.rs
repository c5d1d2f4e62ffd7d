//! Disk and memory sizing engine for the dbengine time-series store.
//!
//! Turns a workload description (nodes, metrics, collection interval,
//! retention, compression, page cache) into the disk space, memory and
//! `dbengine disk space` setting the storage engine needs.

pub mod config;
pub mod error;
pub mod estimator;
pub mod format;
pub mod live;
pub mod params;
pub mod report;

pub use error::{CalcError, Result};
pub use estimator::{CapacityEstimator, Derivation, ResultSet};
pub use params::{Field, ParameterSet, ValidParameters};
