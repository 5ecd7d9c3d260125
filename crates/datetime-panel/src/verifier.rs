//! Per-field input verification.
//!
//! A verifier decides whether the raw text of one field is acceptable. It is
//! a pure predicate: any text that does not parse as the expected integer is
//! simply rejected, never an error.
//!
//! Field kinds differ only in their bounds, so a single [`FieldVerifier`]
//! record covers all of them:
//!
//! | Field  | Accepted range                      |
//! |--------|-------------------------------------|
//! | day    | 1..=31                              |
//! | month  | 1..=12                              |
//! | year   | 2000 and above                      |
//! | hour   | 1..=12 (12-hour), 1..=23 (24-hour)  |
//! | minute | 1..=59                              |
//!
//! Hour and minute both reject `0`. Midnight and the full hour can only be
//! reached through the initial value, not by typing.
//!
//! # Example
//!
//! ```
//! use datetime_panel::verifier::{FieldVerifier, HourMode, Verifier};
//!
//! let hour = FieldVerifier::hour(HourMode::Hour12);
//! assert!(hour.verify("12"));
//! assert!(!hour.verify("13"));
//! assert!(!hour.verify("0"));
//! ```

use std::sync::Arc;

use crate::field::FieldId;

/// Clock used for the hour field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HourMode {
    /// 24-hour clock, no meridiem selector.
    #[default]
    Hour24,
    /// 12-hour clock with an AM/PM selector.
    Hour12,
}

impl HourMode {
    /// Pick the mode from a boolean "12-hour" flag.
    pub fn from_twelve_hour(twelve_hour: bool) -> Self {
        if twelve_hour { Self::Hour12 } else { Self::Hour24 }
    }

    /// Check if this mode uses the 12-hour clock.
    pub fn is_12_hour(&self) -> bool {
        matches!(self, HourMode::Hour12)
    }

    /// Largest hour the hour field accepts in this mode.
    pub fn max_hour(&self) -> i32 {
        match self {
            HourMode::Hour12 => 12,
            HourMode::Hour24 => 23,
        }
    }
}

/// Trait for field verifiers.
///
/// Verifiers must be `Send + Sync` so panels can be moved to the UI thread.
pub trait Verifier: Send + Sync {
    /// Returns `true` if the input is acceptable for the field.
    fn verify(&self, input: &str) -> bool;
}

impl<V: Verifier + ?Sized> Verifier for Arc<V> {
    fn verify(&self, input: &str) -> bool {
        (**self).verify(input)
    }
}

impl<V: Verifier + ?Sized> Verifier for Box<V> {
    fn verify(&self, input: &str) -> bool {
        (**self).verify(input)
    }
}

/// Inclusive integer bounds for one kind of field.
///
/// The text is read the way a plain decimal integer parser reads it: an
/// optional sign followed by ASCII digits, no surrounding whitespace, and
/// it must fit in an `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVerifier {
    minimum: i32,
    /// `None` means unbounded above.
    maximum: Option<i32>,
}

impl FieldVerifier {
    /// Create a verifier with the given inclusive bounds.
    pub const fn new(minimum: i32, maximum: Option<i32>) -> Self {
        Self { minimum, maximum }
    }

    /// Day of month, without regard to the month's length.
    pub const fn day() -> Self {
        Self::new(1, Some(31))
    }

    /// Month of year.
    pub const fn month() -> Self {
        Self::new(1, Some(12))
    }

    /// Year, from 2000 upwards.
    pub const fn year() -> Self {
        Self::new(2000, None)
    }

    /// Hour, bounded by the active clock.
    pub fn hour(mode: HourMode) -> Self {
        Self::new(1, Some(mode.max_hour()))
    }

    /// Minute of hour.
    pub const fn minute() -> Self {
        Self::new(1, Some(59))
    }

    /// The verifier for a given field.
    pub fn for_field(field: FieldId, mode: HourMode) -> Self {
        match field {
            FieldId::Day => Self::day(),
            FieldId::Month => Self::month(),
            FieldId::Year => Self::year(),
            FieldId::Hour => Self::hour(mode),
            FieldId::Minute => Self::minute(),
        }
    }

    /// Get the minimum value.
    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    /// Get the maximum value, if bounded.
    pub fn maximum(&self) -> Option<i32> {
        self.maximum
    }
}

impl Verifier for FieldVerifier {
    fn verify(&self, input: &str) -> bool {
        match input.parse::<i32>() {
            Ok(value) => {
                value >= self.minimum && self.maximum.is_none_or(|maximum| value <= maximum)
            }
            Err(_) => false,
        }
    }
}
