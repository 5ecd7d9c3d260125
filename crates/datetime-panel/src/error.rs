//! Error types for the panel engine.

/// Result type alias for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors that can occur while building panels or reading their values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// The date fields do not form a date, either because a field is marked
    /// invalid or because the combination is not a calendar date.
    #[error(
        "could not create a date for the given values, year: {year}, month: {month}, day: {day}"
    )]
    InvalidDateValues {
        year: String,
        month: String,
        day: String,
    },

    /// The time fields do not form a time of day.
    #[error("could not create a time for the given values, hour: {hour}, minute: {minute}")]
    InvalidTimeValues { hour: String, minute: String },

    /// A field order names an unknown identifier, or repeats or omits one.
    #[error("{field} is not a valid field in order '{order}'")]
    UnexpectedField { field: String, order: String },

    /// A message bundle lacks a key the panel needs.
    #[error("missing message for key '{key}'")]
    MissingMessage { key: String },

    /// A configuration source could not be read or parsed.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl PanelError {
    /// Create a date error from the raw field texts.
    pub fn invalid_date(
        year: impl Into<String>,
        month: impl Into<String>,
        day: impl Into<String>,
    ) -> Self {
        Self::InvalidDateValues {
            year: year.into(),
            month: month.into(),
            day: day.into(),
        }
    }

    /// Create a time error from the raw field texts.
    pub fn invalid_time(hour: impl Into<String>, minute: impl Into<String>) -> Self {
        Self::InvalidTimeValues {
            hour: hour.into(),
            minute: minute.into(),
        }
    }

    /// Create a field order error.
    pub fn unexpected_field(field: impl Into<String>, order: impl Into<String>) -> Self {
        Self::UnexpectedField {
            field: field.into(),
            order: order.into(),
        }
    }

    /// Create a missing message error.
    pub fn missing_message(key: impl Into<String>) -> Self {
        Self::MissingMessage { key: key.into() }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true for errors raised while reading a value, as opposed to
    /// configuration errors raised while building a panel.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDateValues { .. } | Self::InvalidTimeValues { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_carries_raw_values() {
        let err = PanelError::invalid_date("2024", "2", "30");
        assert_eq!(
            err.to_string(),
            "could not create a date for the given values, year: 2024, month: 2, day: 30"
        );
        assert!(err.is_value_error());
    }

    #[test]
    fn test_unexpected_field_message() {
        let err = PanelError::unexpected_field("x", "dmx");
        assert_eq!(err.to_string(), "x is not a valid field in order 'dmx'");
        assert!(!err.is_value_error());
    }
}
