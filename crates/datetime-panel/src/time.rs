//! The time panel: hour and minute fields, plus an AM/PM selector on a
//! 12-hour clock.
//!
//! The clock is fixed when the panel is built. It bounds the hour field
//! (1-12 or 1-23) and decides how the fields compose:
//!
//! | Clock   | Composed text | Example    |
//! |---------|---------------|------------|
//! | 24-hour | `H:mm`        | `13:30`    |
//! | 12-hour | `h:mm AM/PM`  | `1:30 PM`  |
//!
//! The hour is one or more digits, the minute exactly two. On a 12-hour clock
//! `12 AM` is midnight and `12 PM` is noon.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveTime;
//! use datetime_panel::prelude::*;
//!
//! let config = PanelConfig::new().with_locale("en-US").with_twelve_hour(true);
//! let time = NaiveTime::from_hms_opt(13, 30, 0).unwrap();
//! let panel = TimePanel::new(time, &config).unwrap();
//!
//! assert_eq!(panel.text(FieldId::Hour), "1");
//! assert_eq!(panel.meridiem(), Some(Meridiem::Pm));
//! assert_eq!(panel.value().unwrap(), time);
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveTime, Timelike};
use datetime_panel_core::logging::targets;
use datetime_panel_core::{ConnectionId, Signal};

use crate::config::{self, PanelConfig};
use crate::error::{PanelError, Result};
use crate::field::{AppearanceSink, FieldAppearance, FieldChange, FieldGroup, FieldId, FieldState};
use crate::layout::{Component, Placement, constraint};
use crate::messages::{MessageSource, flag, keys};
use crate::panel::{FieldText, Panel, lookup_or};
use crate::verifier::{FieldVerifier, HourMode};

/// Half of the day on a 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// The half of the day a time falls in.
    pub fn of(time: NaiveTime) -> Self {
        if time.hour12().0 { Meridiem::Pm } else { Meridiem::Am }
    }

    /// Display text, `"AM"` or `"PM"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    /// Convert a clock hour (1-12) to an hour of day (0-23).
    pub fn to_hour_of_day(&self, clock_hour: u32) -> Option<u32> {
        match (self, clock_hour) {
            (_, 0) | (_, 13..) => None,
            (Meridiem::Am, 12) => Some(0),
            (Meridiem::Am, hour) => Some(hour),
            (Meridiem::Pm, 12) => Some(12),
            (Meridiem::Pm, hour) => Some(hour + 12),
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hour and minute fields on a 12-hour or 24-hour clock.
pub struct TimePanel {
    group: FieldGroup,
    mode: HourMode,
    meridiem: Option<Meridiem>,
    hour_text: FieldText,
    minute_text: FieldText,
    meridiem_constraints: String,
    layout_constraints: String,
}

impl TimePanel {
    /// Create a panel seeded with `time`.
    pub fn new(time: NaiveTime, config: &PanelConfig) -> Result<Self> {
        Self::with_messages(time, &config.messages(), config.extra_layout_constraints())
    }

    /// Create a panel seeded with the current local time.
    pub fn now(config: &PanelConfig) -> Result<Self> {
        Self::new(Local::now().time(), config)
    }

    /// Create a panel from an explicit message source.
    ///
    /// The clock comes from the `12hour` message. `extra_constraints` is
    /// appended to the panel layout defaults.
    pub fn with_messages(
        time: NaiveTime,
        messages: &dyn MessageSource,
        extra_constraints: Option<&str>,
    ) -> Result<Self> {
        let mode = HourMode::from_twelve_hour(flag(messages, keys::TWELVE_HOUR));

        let (hour, meridiem) = match mode {
            HourMode::Hour24 => (time.hour(), None),
            HourMode::Hour12 => (time.hour12().1, Some(Meridiem::of(time))),
        };

        let group = FieldGroup::new(vec![
            FieldState::new(FieldId::Hour, hour.to_string(), FieldVerifier::hour(mode)),
            FieldState::new(
                FieldId::Minute,
                format!("{:02}", time.minute()),
                FieldVerifier::minute(),
            ),
        ]);

        tracing::debug!(target: targets::FIELD, %time, ?mode, "time panel created");

        Ok(Self {
            group,
            mode,
            meridiem,
            hour_text: FieldText::resolve(messages, FieldId::Hour),
            minute_text: FieldText::resolve(messages, FieldId::Minute),
            meridiem_constraints: lookup_or(messages, keys::AMPM_CONSTRAINTS, ""),
            layout_constraints: config::layout_constraints(
                config::PANEL_LAYOUT_DEFAULTS,
                extra_constraints,
            ),
        })
    }

    /// The clock this panel uses.
    pub fn hour_mode(&self) -> HourMode {
        self.mode
    }

    /// The AM/PM selection, `None` on a 24-hour clock.
    pub fn meridiem(&self) -> Option<Meridiem> {
        self.meridiem
    }

    /// Change the AM/PM selection.
    ///
    /// Fires the change hooks once, reported as a change of the hour. Ignored
    /// on a 24-hour clock.
    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        if !self.mode.is_12_hour() {
            tracing::trace!(target: targets::FIELD, %meridiem, "no meridiem on a 24-hour clock");
            return;
        }

        self.meridiem = Some(meridiem);
        tracing::debug!(target: targets::FIELD, %meridiem, "meridiem selected");
        self.group.notify(FieldChange {
            field: FieldId::Hour,
            text: self.text(FieldId::Hour).to_string(),
            valid: !self.group.registry().contains(FieldId::Hour),
        });
    }

    /// Caption of a time field.
    pub fn caption(&self, field: FieldId) -> Option<&str> {
        self.text_of(field).map(|text| text.caption.as_str())
    }

    /// Tooltip of a time field.
    pub fn tooltip(&self, field: FieldId) -> Option<&str> {
        self.text_of(field).map(|text| text.tooltip.as_str())
    }

    /// Raw text of a field, `""` for non-time fields.
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
    /// Returns the verifier's verdict, or `None` for a non-time field.
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

    /// Register a hook invoked on every edit of the hour or minute, and on
    /// every meridiem change.
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
        match field {
            FieldId::Hour => Some(&self.hour_text),
            FieldId::Minute => Some(&self.minute_text),
            _ => None,
        }
    }

    fn error(&self) -> PanelError {
        PanelError::invalid_time(self.text(FieldId::Hour), self.text(FieldId::Minute))
    }
}

/// Compose a time from raw hour and minute texts.
///
/// With a meridiem the hour is a clock hour (1-12), without one an hour of
/// day (0-23).
pub fn compose_time(hour: &str, minute: &str, meridiem: Option<Meridiem>) -> Option<NaiveTime> {
    let is_digits = |text: &str| !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(hour) || minute.len() != 2 || !is_digits(minute) {
        return None;
    }

    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    let hour = match meridiem {
        Some(meridiem) => meridiem.to_hour_of_day(hour)?,
        None => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

impl Panel for TimePanel {
    type Value = NaiveTime;

    fn value(&self) -> Result<NaiveTime> {
        if !self.group.registry().is_empty() {
            tracing::debug!(
                target: targets::COMPOSE,
                invalid = ?self.group.registry().iter().collect::<Vec<_>>(),
                "time has invalid fields"
            );
            return Err(self.error());
        }

        let meridiem = match self.mode {
            HourMode::Hour12 => Some(self.meridiem.unwrap_or(Meridiem::Am)),
            HourMode::Hour24 => None,
        };

        compose_time(self.text(FieldId::Hour), self.text(FieldId::Minute), meridiem).ok_or_else(
            || {
                tracing::debug!(
                    target: targets::COMPOSE,
                    hour = self.text(FieldId::Hour),
                    minute = self.text(FieldId::Minute),
                    meridiem = ?meridiem,
                    "time does not match the clock pattern"
                );
                self.error()
            },
        )
    }

    fn layout_constraints(&self) -> &str {
        &self.layout_constraints
    }

    fn placements(&self) -> Vec<Placement> {
        let hour = &self.hour_text;
        let minute = &self.minute_text;

        let mut placements = vec![
            Placement::new(
                Component::Caption {
                    field: FieldId::Hour,
                    text: hour.caption.clone(),
                },
                constraint(&hour.constraints, "span 2"),
            ),
            Placement::new(
                Component::Caption {
                    field: FieldId::Minute,
                    text: minute.caption.clone(),
                },
                constraint(&minute.constraints, "span 2, wrap"),
            ),
            Placement::new(Component::Field(FieldId::Hour), hour.constraints.clone()),
            Placement::new(Component::Separator(" : ".to_string()), ""),
            Placement::new(Component::Field(FieldId::Minute), minute.constraints.clone()),
        ];

        if self.mode.is_12_hour() {
            placements.push(Placement::new(Component::spacer(), ""));
            placements.push(Placement::new(
                Component::MeridiemSelector,
                self.meridiem_constraints.clone(),
            ));
        }
        placements
    }
}

impl fmt::Debug for TimePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimePanel")
            .field("mode", &self.mode)
            .field("meridiem", &self.meridiem)
            .field("fields", &self.group)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(TimePanel: Send, Sync);
