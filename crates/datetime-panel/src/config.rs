//! Panel configuration.
//!
//! A [`PanelConfig`] collects everything a panel needs besides its initial
//! value: the locale whose message bundle supplies captions and defaults,
//! optional overrides for the date field order and the clock, extra layout
//! constraints for the layout engine, and individual message overrides.
//!
//! Sources, highest priority first:
//!
//! 1. builder methods (`with_*`),
//! 2. environment variables (see [`env`]),
//! 3. a TOML file,
//! 4. the built-in defaults of the locale.
//!
//! ```ignore
//! use datetime_panel::config::PanelConfig;
//!
//! let config = PanelConfig::load_toml("panel.toml")?
//!     .merge_env()
//!     .with_twelve_hour(false);
//! ```
//!
//! A configuration file looks like this:
//!
//! ```toml
//! locale = "de-DE"
//! field_order = "ymd"
//! twelve_hour = false
//! layout_constraints = "debug"
//!
//! [messages]
//! "day.caption" = "T"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use datetime_panel_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};
use crate::messages::{Messages, keys};

/// Environment variables read by [`PanelConfig::from_env`].
pub mod env {
    /// Locale identifier, e.g. `de-DE`.
    pub const LOCALE: &str = "DATETIME_PANEL_LOCALE";
    /// `true`/`false` (or `1`/`0`) to force the 12-hour or 24-hour clock.
    pub const TWELVE_HOUR: &str = "DATETIME_PANEL_12HOUR";
    /// Date field order, e.g. `ymd`.
    pub const FIELD_ORDER: &str = "DATETIME_PANEL_FIELD_ORDER";
    /// Extra constraints appended to the panel layout defaults.
    pub const LAYOUT: &str = "DATETIME_PANEL_LAYOUT";
}

/// Layout defaults of the date and time panels.
pub const PANEL_LAYOUT_DEFAULTS: &str = "gap 0 0, ins 0 4 4 4";

/// Layout defaults of the combined date-time panel.
pub const DATETIME_LAYOUT_DEFAULTS: &str = "gap 0 0, ins 0";

/// Append configured extra constraints to a set of defaults.
pub fn layout_constraints(defaults: &str, extra: Option<&str>) -> String {
    match extra {
        Some(extra) if !extra.is_empty() => format!("{defaults}, {extra}"),
        _ => defaults.to_string(),
    }
}

/// Configuration shared by all panels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Locale identifier; the system locale when unset.
    pub locale: Option<String>,
    /// Date field order override, e.g. `"ymd"`.
    pub field_order: Option<String>,
    /// Clock override; the locale decides when unset.
    pub twelve_hour: Option<bool>,
    /// Extra layout constraints appended to the defaults.
    pub layout_constraints: Option<String>,
    /// Individual message overrides.
    pub messages: BTreeMap<String, String>,
}

impl PanelConfig {
    /// Create an empty configuration (system locale, no overrides).
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from the process environment.
    pub fn from_env() -> Self {
        Self::new().merge_env()
    }

    /// Layer the process environment over this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Layer variables from a lookup function over this configuration.
    ///
    /// Unparseable values are logged and ignored.
    pub fn merge_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(env::LOCALE) {
            self.locale = Some(locale);
        }
        if let Some(order) = lookup(env::FIELD_ORDER) {
            self.field_order = Some(order);
        }
        if let Some(value) = lookup(env::TWELVE_HOUR) {
            match parse_bool(&value) {
                Some(twelve_hour) => self.twelve_hour = Some(twelve_hour),
                None => tracing::warn!(
                    target: targets::CONFIG,
                    variable = env::TWELVE_HOUR,
                    value = %value,
                    "ignoring unparseable clock override"
                ),
            }
        }
        if let Some(layout) = lookup(env::LAYOUT) {
            self.layout_constraints = Some(layout);
        }
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| PanelError::config(err.to_string()))
    }

    /// Load a configuration from a TOML file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            PanelError::config(format!("failed to read '{}': {err}", path.display()))
        })?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading panel configuration");
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| PanelError::config(err.to_string()))
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Override the date field order.
    pub fn with_field_order(mut self, order: impl Into<String>) -> Self {
        self.field_order = Some(order.into());
        self
    }

    /// Force the 12-hour (`true`) or 24-hour (`false`) clock.
    pub fn with_twelve_hour(mut self, twelve_hour: bool) -> Self {
        self.twelve_hour = Some(twelve_hour);
        self
    }

    /// Set extra layout constraints.
    pub fn with_layout_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.layout_constraints = Some(constraints.into());
        self
    }

    /// Override a single message.
    pub fn with_message(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.messages.insert(key.into(), value.into());
        self
    }

    /// Build the message bundle this configuration describes.
    pub fn messages(&self) -> Messages {
        let mut messages = match &self.locale {
            Some(locale) => Messages::for_locale(locale),
            None => Messages::system(),
        };
        for (key, value) in &self.messages {
            messages.set_message(key.clone(), value.clone());
        }
        if let Some(order) = &self.field_order {
            messages.set_message(keys::DATE_FIELDS, order.clone());
        }
        if let Some(twelve_hour) = self.twelve_hour {
            messages.set_message(keys::TWELVE_HOUR, twelve_hour.to_string());
        }
        messages
    }

    /// Extra layout constraints, if any.
    pub fn extra_layout_constraints(&self) -> Option<&str> {
        self.layout_constraints.as_deref()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
