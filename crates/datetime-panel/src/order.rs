//! Arrangement of the date fields.
//!
//! The order in which day, month and year are laid out comes from the
//! message bundle (`date.ui.fields`) as a string of identifiers such as
//! `"dmy"` or `"ymd"`. It is parsed once, when a panel is built, and must
//! name each of `d`, `m` and `y` exactly once.

use std::fmt;
use std::str::FromStr;

use crate::error::{PanelError, Result};
use crate::field::FieldId;

/// Identifier characters of the date fields.
const IDENTIFIERS: [(char, FieldId); 3] = [
    ('d', FieldId::Day),
    ('m', FieldId::Month),
    ('y', FieldId::Year),
];

/// Validated order of the three date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldOrder {
    fields: [FieldId; 3],
}

impl FieldOrder {
    /// Day, month, year.
    pub const DMY: Self = Self {
        fields: [FieldId::Day, FieldId::Month, FieldId::Year],
    };
    /// Month, day, year.
    pub const MDY: Self = Self {
        fields: [FieldId::Month, FieldId::Day, FieldId::Year],
    };
    /// Year, month, day.
    pub const YMD: Self = Self {
        fields: [FieldId::Year, FieldId::Month, FieldId::Day],
    };

    /// Parse an order string like `"dmy"`.
    ///
    /// Each character is one identifier. Unknown, repeated or missing
    /// identifiers fail with [`PanelError::UnexpectedField`].
    pub fn parse(order: &str) -> Result<Self> {
        let mut fields = Vec::with_capacity(3);

        for identifier in order.chars() {
            let Some(field) = Self::field_of(identifier) else {
                return Err(PanelError::unexpected_field(identifier.to_string(), order));
            };
            if fields.contains(&field) {
                return Err(PanelError::unexpected_field(identifier.to_string(), order));
            }
            fields.push(field);
        }

        match <[FieldId; 3]>::try_from(fields) {
            Ok(fields) => Ok(Self { fields }),
            Err(fields) => {
                let missing = IDENTIFIERS
                    .into_iter()
                    .find(|(_, field)| !fields.contains(field))
                    .map(|(identifier, _)| identifier.to_string())
                    .unwrap_or_default();
                Err(PanelError::unexpected_field(missing, order))
            }
        }
    }

    /// The fields, first to last.
    pub fn fields(&self) -> [FieldId; 3] {
        self.fields
    }

    /// Iterate over the fields, first to last.
    pub fn iter(&self) -> impl Iterator<Item = FieldId> {
        self.fields.into_iter()
    }

    /// Position of a date field in this order.
    pub fn position(&self, field: FieldId) -> Option<usize> {
        self.fields.iter().position(|&other| other == field)
    }

    fn field_of(identifier: char) -> Option<FieldId> {
        IDENTIFIERS
            .into_iter()
            .find_map(|(known, field)| (known == identifier).then_some(field))
    }

    fn identifier(field: FieldId) -> Option<char> {
        IDENTIFIERS
            .into_iter()
            .find_map(|(identifier, known)| (known == field).then_some(identifier))
    }
}

impl Default for FieldOrder {
    fn default() -> Self {
        Self::DMY
    }
}

impl FromStr for FieldOrder {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for identifier in self.fields.into_iter().filter_map(Self::identifier) {
            write!(f, "{identifier}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_orders() {
        assert_eq!(FieldOrder::parse("dmy").unwrap(), FieldOrder::DMY);
        assert_eq!(FieldOrder::parse("mdy").unwrap(), FieldOrder::MDY);
        assert_eq!(FieldOrder::parse("ymd").unwrap(), FieldOrder::YMD);
        assert_eq!(
            FieldOrder::parse("ydm").unwrap().fields(),
            [FieldId::Year, FieldId::Day, FieldId::Month]
        );
    }

    #[test]
    fn test_unknown_identifier() {
        let err = FieldOrder::parse("dmx").unwrap_err();
        assert_eq!(err, PanelError::unexpected_field("x", "dmx"));
    }

    #[test]
    fn test_duplicate_identifier() {
        let err = FieldOrder::parse("ddy").unwrap_err();
        assert_eq!(err, PanelError::unexpected_field("d", "ddy"));
    }

    #[test]
    fn test_missing_identifier() {
        assert_eq!(
            FieldOrder::parse("dm").unwrap_err(),
            PanelError::unexpected_field("y", "dm")
        );
        assert_eq!(
            FieldOrder::parse("").unwrap_err(),
            PanelError::unexpected_field("d", "")
        );
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        assert!(FieldOrder::parse("DMY").is_err());
        assert!(FieldOrder::parse(" dmy").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for order in ["dmy", "mdy", "ymd", "myd"] {
            assert_eq!(order.parse::<FieldOrder>().unwrap().to_string(), order);
        }
    }

    #[test]
    fn test_time_fields_have_no_identifier() {
        assert_eq!(FieldOrder::identifier(FieldId::Hour), None);
        assert_eq!(FieldOrder::identifier(FieldId::Minute), None);
        assert_eq!(FieldOrder::field_of('h'), None);
        assert_eq!(FieldOrder::identifier(FieldId::Year), Some('y'));
    }

    #[test]
    fn test_position() {
        assert_eq!(FieldOrder::YMD.position(FieldId::Day), Some(2));
        assert_eq!(FieldOrder::YMD.position(FieldId::Hour), None);
    }
}
