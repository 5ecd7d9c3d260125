//! The date panel: year, month and day fields.
//!
//! A [`DatePanel`] is seeded from a date and composes a [`NaiveDate`] from
//! its three fields on demand. Composition fails if any field is registered
//! invalid, or if the three values are individually in range but do not name
//! a calendar date (April 31st, February 30th, ...).
//!
//! The year verifier has no upper bound, but [`NaiveDate`] ends at
//! [`NaiveDate::MAX`] (year 262142). Later years verify and then fail to
//! compose.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use datetime_panel::prelude::*;
//!
//! let config = PanelConfig::new().with_locale("en-GB");
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let mut panel = DatePanel::new(date, &config).unwrap();
//! assert_eq!(panel.value().unwrap(), date);
//!
//! panel.set_text(FieldId::Day, "30");
//! panel.set_text(FieldId::Month, "2");
//! assert!(!panel.is_valid());
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use datetime_panel_core::logging::targets;
use datetime_panel_core::{ConnectionId, Signal};

use crate::config::{self, PanelConfig};
use crate::error::{PanelError, Result};
use crate::field::{AppearanceSink, FieldAppearance, FieldChange, FieldGroup, FieldId, FieldState};
use crate::layout::{Component, Placement, constraint};
use crate::messages::{MessageSource, keys};
use crate::order::FieldOrder;
use crate::panel::{FieldText, Panel, lookup_or};
use crate::verifier::FieldVerifier;

/// Separator used when the bundle does not provide one.
const DEFAULT_SEPARATOR: &str = "/";

/// Year, month and day fields arranged in a configurable order.
pub struct DatePanel {
    group: FieldGroup,
    order: FieldOrder,
    separator: String,
    texts: [FieldText; 3],
    layout_constraints: String,
}

impl DatePanel {
    /// Create a panel seeded with `date`.
    ///
    /// Fails with [`PanelError::UnexpectedField`] if the configured field
    /// order is malformed.
    pub fn new(date: NaiveDate, config: &PanelConfig) -> Result<Self> {
        Self::with_messages(date, &config.messages(), config.extra_layout_constraints())
    }

    /// Create a panel seeded with today's local date.
    pub fn now(config: &PanelConfig) -> Result<Self> {
        Self::new(Local::now().date_naive(), config)
    }

    /// Create a panel from an explicit message source.
    ///
    /// `extra_constraints` is appended to the panel layout defaults.
    pub fn with_messages(
        date: NaiveDate,
        messages: &dyn MessageSource,
        extra_constraints: Option<&str>,
    ) -> Result<Self> {
        let order = FieldOrder::parse(&messages.require(keys::DATE_FIELDS)?)?;
        let separator = lookup_or(messages, keys::DATE_SEPARATOR, DEFAULT_SEPARATOR);
        let texts = order.fields().map(|field| FieldText::resolve(messages, field));

        let group = FieldGroup::new(vec![
            FieldState::new(FieldId::Year, date.year().to_string(), FieldVerifier::year()),
            FieldState::new(FieldId::Month, date.month().to_string(), FieldVerifier::month()),
            FieldState::new(FieldId::Day, date.day().to_string(), FieldVerifier::day()),
        ]);

        tracing::debug!(target: targets::FIELD, %date, %order, "date panel created");

        Ok(Self {
            group,
            order,
            separator,
            texts,
            layout_constraints: config::layout_constraints(
                config::PANEL_LAYOUT_DEFAULTS,
                extra_constraints,
            ),
        })
    }

    /// The order the fields are laid out in.
    pub fn order(&self) -> FieldOrder {
        self.order
    }

    /// Text shown between the fields.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Caption of a date field.
    pub fn caption(&self, field: FieldId) -> Option<&str> {
        self.text_of(field).map(|text| text.caption.as_str())
    }

    /// Tooltip of a date field.
    pub fn tooltip(&self, field: FieldId) -> Option<&str> {
        self.text_of(field).map(|text| text.tooltip.as_str())
    }

    /// Raw text of a field, `""` for non-date fields.
    pub fn text(&self, field: FieldId) -> &str {
        self.group.text(field)
    }

    /// A field's state.
    pub fn field(&self, field: FieldId) -> Option<&FieldState> {
        self.group.field(field)
    }

    /// The fields and their validation registry.
    pub fn fields(&self) -> &FieldGroup {
        &self.group
    }

    /// Replace a field's raw text, as typing into it would.
    ///
    /// Returns the verifier's verdict, or `None` for a non-date field.
    pub fn set_text(&mut self, field: FieldId, text: impl Into<String>) -> Option<bool> {
        self.group.edit(field, text)
    }

    /// Hand the panel to the calling thread.
    ///
    /// A panel belongs to the first thread that edits it. Call this after
    /// moving an already edited panel to another thread.
    pub fn rebind_to_current_thread(&mut self) {
        self.group.rebind_to_current_thread();
    }

    /// Register a hook invoked on every edit of any date field.
    pub fn on_change<F>(&self, hook: F) -> ConnectionId
    where
        F: Fn(&FieldChange) + Send + Sync + 'static,
    {
        self.group.on_change(hook)
    }

    /// Remove a change hook. Returns `false` if it was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.group.changed.disconnect(id)
    }

    /// Signal emitted with a field's appearance after every edit.
    pub fn appearance_changed(&self) -> &Signal<(FieldId, FieldAppearance)> {
        &self.group.appearance_changed
    }

    /// Forward appearance updates to a sink.
    pub fn connect_appearance(&self, sink: Arc<dyn AppearanceSink>) -> ConnectionId {
        self.group.connect_appearance(sink)
    }

    fn text_of(&self, field: FieldId) -> Option<&FieldText> {
        self.texts.iter().find(|text| text.field == field)
    }

    fn error(&self) -> PanelError {
        PanelError::invalid_date(
            self.text(FieldId::Year),
            self.text(FieldId::Month),
            self.text(FieldId::Day),
        )
    }
}

impl Panel for DatePanel {
    type Value = NaiveDate;

    fn value(&self) -> Result<NaiveDate> {
        if !self.group.registry().is_empty() {
            tracing::debug!(
                target: targets::COMPOSE,
                invalid = ?self.group.registry().iter().collect::<Vec<_>>(),
                "date has invalid fields"
            );
            return Err(self.error());
        }

        let year = self.text(FieldId::Year).parse::<i32>().ok();
        let month = self.text(FieldId::Month).parse::<u32>().ok();
        let day = self.text(FieldId::Day).parse::<u32>().ok();

        match (year, month, day) {
            (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| {
                    if year > NaiveDate::MAX.year() {
                        tracing::warn!(
                            target: targets::COMPOSE,
                            year,
                            max_year = NaiveDate::MAX.year(),
                            "year verified but lies beyond the supported calendar range"
                        );
                    } else {
                        tracing::debug!(target: targets::COMPOSE, year, month, day, "not a calendar date");
                    }
                    self.error()
                }),
            _ => Err(self.error()),
        }
    }

    fn layout_constraints(&self) -> &str {
        &self.layout_constraints
    }

    fn placements(&self) -> Vec<Placement> {
        let [first, second, third] = &self.texts;
        let caption = |text: &FieldText, suffix: &str| {
            Placement::new(
                Component::Caption {
                    field: text.field,
                    text: text.caption.clone(),
                },
                constraint(&text.constraints, suffix),
            )
        };
        let separator = || Placement::new(Component::Separator(self.separator.clone()), "");

        vec![
            caption(first, "span 2"),
            caption(second, "span 2"),
            caption(third, "wrap"),
            Placement::new(Component::Field(first.field), first.constraints.clone()),
            separator(),
            Placement::new(Component::Field(second.field), second.constraints.clone()),
            separator(),
            Placement::new(Component::Field(third.field), constraint(&third.constraints, "wrap")),
        ]
    }
}

impl fmt::Debug for DatePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePanel")
            .field("order", &self.order)
            .field("fields", &self.group)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(DatePanel: Send, Sync);
