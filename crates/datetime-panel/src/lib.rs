//! Datetime Panel - validation, composition and parsing for date/time input
//! panels.
//!
//! A panel is a group of text fields (year, month, day, hour, minute and, on
//! a 12-hour clock, an AM/PM selector) that together describe one point in
//! time. Every edit is verified on the spot; the panel composes a value only
//! when every field verified and the fields form a real date or time.
//!
//! - [`DatePanel`] composes a [`chrono::NaiveDate`]
//! - [`TimePanel`] composes a [`chrono::NaiveTime`]
//! - [`DateTimePanel`] composes a [`chrono::NaiveDateTime`]
//!
//! Rendering is left to the caller: panels describe their layout through
//! [`LayoutSink`] and their field appearance through [`AppearanceSink`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use datetime_panel::prelude::*;
//!
//! let config = PanelConfig::new().with_locale("de-DE");
//! let value = NaiveDate::from_ymd_opt(2024, 3, 15)
//!     .unwrap()
//!     .and_hms_opt(9, 5, 0)
//!     .unwrap();
//!
//! let mut panel = DateTimePanel::new(value, &config).unwrap();
//! panel.on_change(|change| println!("{} is now {:?}", change.field, change.text));
//!
//! panel.set_text(FieldId::Minute, "0");
//! assert!(!panel.is_valid());
//!
//! panel.set_text(FieldId::Minute, "45");
//! assert_eq!(panel.value().unwrap(), value.date().and_hms_opt(9, 45, 0).unwrap());
//! ```

pub mod config;
pub mod date;
pub mod datetime;
pub mod error;
pub mod field;
pub mod layout;
pub mod messages;
pub mod order;
pub mod panel;
pub mod time;
pub mod verifier;

pub use config::PanelConfig;
pub use date::DatePanel;
pub use datetime::{DateTimeConnection, DateTimePanel};
pub use error::{PanelError, Result};
pub use field::{
    AppearanceSink, FieldAppearance, FieldChange, FieldGroup, FieldId, FieldState,
    ValidationRegistry,
};
pub use layout::{Component, LayoutSink, Placement};
pub use messages::{MessageSource, Messages};
pub use order::FieldOrder;
pub use panel::Panel;
pub use time::{Meridiem, TimePanel};
pub use verifier::{FieldVerifier, HourMode, Verifier};

pub use datetime_panel_core::{ConnectionId, Signal};

/// Commonly used types.
pub mod prelude {
    pub use crate::config::PanelConfig;
    pub use crate::date::DatePanel;
    pub use crate::datetime::{DateTimeConnection, DateTimePanel};
    pub use crate::error::{PanelError, Result};
    pub use crate::field::{AppearanceSink, FieldChange, FieldId};
    pub use crate::layout::{Component, LayoutSink, Placement};
    pub use crate::messages::{MessageSource, Messages};
    pub use crate::panel::Panel;
    pub use crate::time::{Meridiem, TimePanel};
    pub use crate::verifier::HourMode;
}
