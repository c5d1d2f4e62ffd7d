//! Text rendering of estimator outputs.

/// Configuration section holding the dbengine settings.
pub const CONFIG_SECTION: &str = "global";
/// Key controlling disk space per dbengine instance.
pub const DISK_SPACE_KEY: &str = "dbengine disk space";

/// Renders the block to paste into the agent's configuration file.
///
/// The value is written as a plain integer.
pub fn config_snippet(per_instance_disk_setting_mib: u64) -> String {
    format!(
        "[{}]\n    {} = {}",
        CONFIG_SECTION, DISK_SPACE_KEY, per_instance_disk_setting_mib
    )
}

/// Renders a size as `"<n> MiB"`.
pub fn format_mib(mib: u64) -> String {
    format!("{} MiB", mib)
}

/// Appends `s` unless `count` is exactly one.
pub(crate) fn plural(count: f64) -> &'static str {
    if count == 1.0 {
        ""
    } else {
        "s"
    }
}
