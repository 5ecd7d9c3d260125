//! Message bundles: captions, tooltips and per-locale panel settings.
//!
//! Panels read all their text and locale-dependent settings through a
//! [`MessageSource`], keyed by dotted names:
//!
//! | Key                                   | Meaning                              |
//! |---------------------------------------|--------------------------------------|
//! | `day.caption`, `day.tooltip`, ...     | label and tooltip of each field      |
//! | `date.ui.fields`                      | date field order, e.g. `dmy`         |
//! | `date.ui.fields.separator`            | text between the date fields         |
//! | `12hour`                              | `true` for a 12-hour clock           |
//! | `panel.date.constraints`              | placement of the date panel          |
//! | `panel.time.constraints`              | placement of the time panel          |
//! | `panel.date.field.day.constraints`    | placement of a date field and label  |
//! | `panel.time.field.hour.constraints`   | placement of a time field and label  |
//! | `panel.time.field.ampm.constraints`   | placement of the AM/PM selector      |
//!
//! [`Messages`] is the built-in bundle. It derives the field order, the
//! separator and the clock from the locale, and ships English and German
//! captions; any key can be overridden.
//!
//! # Example
//!
//! ```
//! use datetime_panel::messages::{MessageSource, Messages};
//!
//! let messages = Messages::for_locale("de-DE");
//! assert_eq!(messages.message("date.ui.fields").as_deref(), Some("dmy"));
//! assert_eq!(messages.message("date.ui.fields.separator").as_deref(), Some("."));
//! assert_eq!(messages.message("day.caption").as_deref(), Some("Tag"));
//!
//! let messages = Messages::for_locale("en-US").with_message("day.caption", "D");
//! assert_eq!(messages.message("12hour").as_deref(), Some("true"));
//! assert_eq!(messages.message("day.caption").as_deref(), Some("D"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{PanelError, Result};
use crate::field::FieldId;
use crate::order::FieldOrder;

/// Provider of panel text, keyed by message name.
pub trait MessageSource: Send + Sync {
    /// Look up a message, `None` if the key is unknown.
    fn message(&self, key: &str) -> Option<String>;

    /// Look up a message that the panel cannot do without.
    fn require(&self, key: &str) -> Result<String> {
        self.message(key)
            .ok_or_else(|| PanelError::missing_message(key))
    }
}

impl<M: MessageSource + ?Sized> MessageSource for Arc<M> {
    fn message(&self, key: &str) -> Option<String> {
        (**self).message(key)
    }
}

impl<M: MessageSource + ?Sized> MessageSource for Box<M> {
    fn message(&self, key: &str) -> Option<String> {
        (**self).message(key)
    }
}

/// Message keys used by the panels.
pub mod keys {
    /// Date field order, e.g. `dmy`.
    pub const DATE_FIELDS: &str = "date.ui.fields";
    /// Text placed between date fields.
    pub const DATE_SEPARATOR: &str = "date.ui.fields.separator";
    /// `true` for a 12-hour clock.
    pub const TWELVE_HOUR: &str = "12hour";
    /// Placement of the date panel inside a date-time panel.
    pub const DATE_PANEL_CONSTRAINTS: &str = "panel.date.constraints";
    /// Placement of the time panel inside a date-time panel.
    pub const TIME_PANEL_CONSTRAINTS: &str = "panel.time.constraints";
    /// Placement of the AM/PM selector.
    pub const AMPM_CONSTRAINTS: &str = "panel.time.field.ampm.constraints";
}

/// Key of a field's caption, e.g. `day.caption`.
pub fn caption_key(field: FieldId) -> String {
    format!("{}.caption", field.key())
}

/// Key of a field's tooltip, e.g. `day.tooltip`.
pub fn tooltip_key(field: FieldId) -> String {
    format!("{}.tooltip", field.key())
}

/// Key of a field's placement constraints.
pub fn constraints_key(field: FieldId) -> String {
    let panel = if field.is_date_field() { "date" } else { "time" };
    format!("panel.{panel}.field.{}.constraints", field.key())
}

/// Language and region parts of a locale identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
    /// The full locale identifier (e.g., "en-US", "de-DE").
    pub identifier: String,
    /// The language code (e.g., "en", "de").
    pub language: String,
    /// The region/country code (e.g., "US", "DE"), if present.
    pub region: Option<String>,
}

impl LocaleInfo {
    /// Parse a locale identifier into its components.
    ///
    /// Accepts `-` and `_` separators and ignores encoding suffixes such as
    /// `.UTF-8`.
    pub fn parse(identifier: &str) -> Self {
        let base = identifier.split(['.', '@']).next().unwrap_or_default();
        let mut parts = base.split(['-', '_']);

        let language = parts
            .next()
            .filter(|language| !language.is_empty())
            .unwrap_or("en")
            .to_lowercase();

        let region = parts
            .find(|part| {
                (part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
                    || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
            })
            .map(str::to_uppercase);

        Self {
            identifier: identifier.to_string(),
            language,
            region,
        }
    }

    /// The locale the system reports, `en-US` if none can be detected.
    #[cfg(feature = "localization")]
    pub fn system() -> Self {
        match sys_locale::get_locale() {
            Some(locale) => Self::parse(&locale),
            None => {
                tracing::warn!(target: datetime_panel_core::logging::targets::CONFIG, "no system locale detected, using en-US");
                Self::default()
            }
        }
    }

    /// The locale the system reports, `en-US` if none can be detected.
    #[cfg(not(feature = "localization"))]
    pub fn system() -> Self {
        Self::default()
    }

    /// Date field order customary for this locale.
    pub fn date_order(&self) -> FieldOrder {
        const YMD_LANGS: [&str; 7] = ["ja", "zh", "ko", "hu", "lt", "mn", "fa"];

        if YMD_LANGS.contains(&self.language.as_str()) {
            FieldOrder::YMD
        } else if self.is_us_style() {
            FieldOrder::MDY
        } else {
            FieldOrder::DMY
        }
    }

    /// Separator customary between date fields.
    pub fn date_separator(&self) -> &'static str {
        const PERIOD_SEP_LANGS: [&str; 13] = [
            "de", "no", "nb", "nn", "fi", "et", "lv", "sl", "sk", "cs", "hr", "ro", "bg",
        ];
        const DASH_SEP_LANGS: [&str; 4] = ["nl", "da", "sv", "is"];

        let language = self.language.as_str();
        if self.date_order() != FieldOrder::DMY {
            "/"
        } else if PERIOD_SEP_LANGS.contains(&language) {
            "."
        } else if DASH_SEP_LANGS.contains(&language) {
            "-"
        } else {
            "/"
        }
    }

    /// Whether the locale customarily uses the 12-hour clock.
    pub fn uses_12_hour(&self) -> bool {
        self.is_us_style()
    }

    fn is_us_style(&self) -> bool {
        matches!(
            (self.language.as_str(), self.region.as_deref()),
            ("en", Some("US")) | ("en", Some("PH")) | ("es", Some("US")) | ("fil", _)
        )
    }
}

impl Default for LocaleInfo {
    fn default() -> Self {
        Self::parse("en-US")
    }
}

const ENGLISH: [(&str, &str); 10] = [
    ("day.caption", "Day"),
    ("day.tooltip", "Day of month (1-31)"),
    ("month.caption", "Month"),
    ("month.tooltip", "Month (1-12)"),
    ("year.caption", "Year"),
    ("year.tooltip", "Year (2000 or later)"),
    ("hour.caption", "Hour"),
    ("hour.tooltip", "Hour"),
    ("minute.caption", "Min."),
    ("minute.tooltip", "Minute (01-59)"),
];

const GERMAN: [(&str, &str); 10] = [
    ("day.caption", "Tag"),
    ("day.tooltip", "Tag des Monats (1-31)"),
    ("month.caption", "Monat"),
    ("month.tooltip", "Monat (1-12)"),
    ("year.caption", "Jahr"),
    ("year.tooltip", "Jahr (ab 2000)"),
    ("hour.caption", "Std."),
    ("hour.tooltip", "Stunde"),
    ("minute.caption", "Min."),
    ("minute.tooltip", "Minute (01-59)"),
];

const CONSTRAINTS: [(&str, &str); 8] = [
    ("panel.date.constraints", ""),
    ("panel.time.constraints", ""),
    ("panel.date.field.day.constraints", "w 28!, al center"),
    ("panel.date.field.month.constraints", "w 28!, al center"),
    ("panel.date.field.year.constraints", "w 44!, al center"),
    ("panel.time.field.hour.constraints", "w 28!, al center"),
    ("panel.time.field.minute.constraints", "w 28!, al center"),
    ("panel.time.field.ampm.constraints", "w 56!"),
];

/// The built-in message bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    locale: LocaleInfo,
    entries: BTreeMap<String, String>,
}

impl Messages {
    /// Bundle for a locale identifier such as `"en-US"` or `"de_DE.UTF-8"`.
    pub fn for_locale(locale: &str) -> Self {
        Self::from_info(LocaleInfo::parse(locale))
    }

    /// Bundle for the system locale.
    pub fn system() -> Self {
        Self::from_info(LocaleInfo::system())
    }

    fn from_info(locale: LocaleInfo) -> Self {
        let captions = match locale.language.as_str() {
            "de" => GERMAN,
            _ => ENGLISH,
        };

        let mut entries: BTreeMap<String, String> = captions
            .iter()
            .chain(CONSTRAINTS.iter())
            .map(|&(key, value)| (key.to_string(), value.to_string()))
            .collect();
        entries.insert(keys::DATE_FIELDS.to_string(), locale.date_order().to_string());
        entries.insert(
            keys::DATE_SEPARATOR.to_string(),
            locale.date_separator().to_string(),
        );
        entries.insert(
            keys::TWELVE_HOUR.to_string(),
            locale.uses_12_hour().to_string(),
        );

        Self { locale, entries }
    }

    /// Override a message, builder style.
    pub fn with_message(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_message(key, value);
        self
    }

    /// Override a message.
    pub fn set_message(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a message.
    pub fn remove_message(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// The locale this bundle was built for.
    pub fn locale(&self) -> &LocaleInfo {
        &self.locale
    }

    /// All keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::from_info(LocaleInfo::default())
    }
}

impl MessageSource for Messages {
    fn message(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Read a boolean message the way `12hour` is read: `true` in any case is
/// true, anything else (including a missing key) is false.
pub fn flag(source: &dyn MessageSource, key: &str) -> bool {
    source
        .message(key)
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        let info = LocaleInfo::parse("de_DE.UTF-8");
        assert_eq!(info.language, "de");
        assert_eq!(info.region.as_deref(), Some("DE"));

        let info = LocaleInfo::parse("zh-Hans-CN");
        assert_eq!(info.language, "zh");
        assert_eq!(info.region.as_deref(), Some("CN"));

        let info = LocaleInfo::parse("");
        assert_eq!(info.language, "en");
        assert_eq!(info.region, None);
    }

    #[test]
    fn test_date_order_by_locale() {
        assert_eq!(LocaleInfo::parse("en-US").date_order(), FieldOrder::MDY);
        assert_eq!(LocaleInfo::parse("en-GB").date_order(), FieldOrder::DMY);
        assert_eq!(LocaleInfo::parse("ja-JP").date_order(), FieldOrder::YMD);
        assert_eq!(LocaleInfo::parse("fr-FR").date_order(), FieldOrder::DMY);
    }

    #[test]
    fn test_separator_by_locale() {
        assert_eq!(LocaleInfo::parse("de-AT").date_separator(), ".");
        assert_eq!(LocaleInfo::parse("nl-NL").date_separator(), "-");
        assert_eq!(LocaleInfo::parse("fr-FR").date_separator(), "/");
        assert_eq!(LocaleInfo::parse("en-US").date_separator(), "/");
        assert_eq!(LocaleInfo::parse("ko-KR").date_separator(), "/");
    }

    #[test]
    fn test_clock_by_locale() {
        assert!(LocaleInfo::parse("en-US").uses_12_hour());
        assert!(LocaleInfo::parse("fil-PH").uses_12_hour());
        assert!(!LocaleInfo::parse("en-GB").uses_12_hour());
        assert!(!LocaleInfo::parse("de-DE").uses_12_hour());
    }

    #[test]
    fn test_bundle_has_every_field_key() {
        for locale in ["en-US", "de-DE", "ja-JP"] {
            let messages = Messages::for_locale(locale);
            for field in [
                FieldId::Day,
                FieldId::Month,
                FieldId::Year,
                FieldId::Hour,
                FieldId::Minute,
            ] {
                assert!(messages.message(&caption_key(field)).is_some(), "{locale} {field}");
                assert!(messages.message(&tooltip_key(field)).is_some(), "{locale} {field}");
                assert!(messages.message(&constraints_key(field)).is_some(), "{locale} {field}");
            }
            assert!(messages.message(keys::AMPM_CONSTRAINTS).is_some());
        }
    }

    #[test]
    fn test_unknown_language_falls_back_to_english_captions() {
        let messages = Messages::for_locale("fr-FR");
        assert_eq!(messages.message("month.caption").as_deref(), Some("Month"));
        assert_eq!(messages.message(keys::DATE_FIELDS).as_deref(), Some("dmy"));
    }

    #[test]
    fn test_require_missing_key() {
        let mut messages = Messages::default();
        messages.remove_message("day.caption");
        assert_eq!(
            messages.require("day.caption").unwrap_err(),
            PanelError::missing_message("day.caption")
        );
    }

    #[test]
    fn test_flag_parsing() {
        let messages = Messages::default()
            .with_message("a", "TRUE")
            .with_message("b", "yes")
            .with_message("c", " true");
        assert!(flag(&messages, "a"));
        assert!(!flag(&messages, "b"));
        assert!(!flag(&messages, "c"));
        assert!(!flag(&messages, "missing"));
    }

    #[test]
    fn test_constraints_key() {
        assert_eq!(constraints_key(FieldId::Year), "panel.date.field.year.constraints");
        assert_eq!(constraints_key(FieldId::Minute), "panel.time.field.minute.constraints");
    }
}
