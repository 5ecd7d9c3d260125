//! Logging facilities for datetime panels.
//!
//! The panels are instrumented with the `tracing` crate. The library never
//! installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("datetime_panel=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "datetime_panel_core::signal";
    /// Field edits and verification.
    pub const FIELD: &str = "datetime_panel::field";
    /// Date, time and date-time composition.
    pub const COMPOSE: &str = "datetime_panel::compose";
    /// Configuration and message bundle resolution.
    pub const CONFIG: &str = "datetime_panel::config";
    /// Layout emission.
    pub const LAYOUT: &str = "datetime_panel::layout";
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::SIGNAL,
            targets::FIELD,
            targets::COMPOSE,
            targets::CONFIG,
            targets::LAYOUT,
        ] {
            assert!(target.starts_with("datetime_panel"), "{target}");
        }
    }
}
