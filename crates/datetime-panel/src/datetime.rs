//! The combined date-time panel.
//!
//! A [`DateTimePanel`] owns a [`DatePanel`] and a [`TimePanel`] built from
//! one initial value. It composes a [`NaiveDateTime`] only when both parts
//! compose. The date part is evaluated first, so a panel with errors in both
//! parts reports the date error.

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use datetime_panel_core::ConnectionId;

use crate::config::{self, PanelConfig};
use crate::date::DatePanel;
use crate::error::Result;
use crate::field::{AppearanceSink, FieldChange, FieldId};
use crate::layout::{Component, Placement};
use crate::messages::{MessageSource, keys};
use crate::panel::{Panel, lookup_or};
use crate::time::TimePanel;

/// Hook connections made by [`DateTimePanel::on_change`], one per part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeConnection {
    pub date: ConnectionId,
    pub time: ConnectionId,
}

/// A date panel and a time panel side by side.
pub struct DateTimePanel {
    date: DatePanel,
    time: TimePanel,
    date_constraints: String,
    time_constraints: String,
    layout_constraints: String,
}

impl DateTimePanel {
    /// Create a panel seeded with `value`.
    pub fn new(value: NaiveDateTime, config: &PanelConfig) -> Result<Self> {
        Self::with_messages(value, &config.messages(), config.extra_layout_constraints())
    }

    /// Create a panel seeded with the current local date and time.
    pub fn now(config: &PanelConfig) -> Result<Self> {
        Self::new(Local::now().naive_local(), config)
    }

    /// Create a panel from an explicit message source.
    ///
    /// `extra_constraints` is appended to the layout defaults of the combined
    /// panel and of both parts.
    pub fn with_messages(
        value: NaiveDateTime,
        messages: &dyn MessageSource,
        extra_constraints: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            date: DatePanel::with_messages(value.date(), messages, extra_constraints)?,
            time: TimePanel::with_messages(value.time(), messages, extra_constraints)?,
            date_constraints: lookup_or(messages, keys::DATE_PANEL_CONSTRAINTS, ""),
            time_constraints: lookup_or(messages, keys::TIME_PANEL_CONSTRAINTS, ""),
            layout_constraints: config::layout_constraints(
                config::DATETIME_LAYOUT_DEFAULTS,
                extra_constraints,
            ),
        })
    }

    /// The date part.
    pub fn date_panel(&self) -> &DatePanel {
        &self.date
    }

    /// The date part, for editing.
    pub fn date_panel_mut(&mut self) -> &mut DatePanel {
        &mut self.date
    }

    /// The time part.
    pub fn time_panel(&self) -> &TimePanel {
        &self.time
    }

    /// The time part, for editing.
    pub fn time_panel_mut(&mut self) -> &mut TimePanel {
        &mut self.time
    }

    /// Raw text of any field.
    pub fn text(&self, field: FieldId) -> &str {
        if field.is_date_field() {
            self.date.text(field)
        } else {
            self.time.text(field)
        }
    }

    /// Replace a field's raw text, routed to the part that owns it.
    pub fn set_text(&mut self, field: FieldId, text: impl Into<String>) -> Option<bool> {
        if field.is_date_field() {
            self.date.set_text(field, text)
        } else {
            self.time.set_text(field, text)
        }
    }

    /// Hand both parts to the calling thread.
    pub fn rebind_to_current_thread(&mut self) {
        self.date.rebind_to_current_thread();
        self.time.rebind_to_current_thread();
    }

    /// Register a hook on both parts.
    ///
    /// An edit in either part invokes the hook once.
    pub fn on_change<F>(&self, hook: F) -> DateTimeConnection
    where
        F: Fn(&FieldChange) + Send + Sync + 'static,
    {
        let hook = Arc::new(hook);
        let time_hook = hook.clone();
        DateTimeConnection {
            date: self.date.on_change(move |change| (*hook)(change)),
            time: self.time.on_change(move |change| (*time_hook)(change)),
        }
    }

    /// Remove a hook from both parts. Returns `false` if it was connected to
    /// neither.
    pub fn disconnect(&self, connection: DateTimeConnection) -> bool {
        let date = self.date.disconnect(connection.date);
        let time = self.time.disconnect(connection.time);
        date || time
    }

    /// Forward appearance updates of both parts to a sink.
    pub fn connect_appearance(&self, sink: Arc<dyn AppearanceSink>) -> DateTimeConnection {
        DateTimeConnection {
            date: self.date.connect_appearance(sink.clone()),
            time: self.time.connect_appearance(sink),
        }
    }
}

impl Panel for DateTimePanel {
    type Value = NaiveDateTime;

    fn value(&self) -> Result<NaiveDateTime> {
        let date = self.date.value()?;
        let time = self.time.value()?;
        Ok(date.and_time(time))
    }

    fn layout_constraints(&self) -> &str {
        &self.layout_constraints
    }

    fn placements(&self) -> Vec<Placement> {
        vec![
            Placement::new(Component::DatePanel, self.date_constraints.clone()),
            Placement::new(Component::spacer(), ""),
            Placement::new(Component::TimePanel, self.time_constraints.clone()),
        ]
    }
}

impl fmt::Debug for DateTimePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimePanel")
            .field("date", &self.date)
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(DateTimePanel: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PanelError;
    use crate::messages::Messages;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn value() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(13, 30, 0)
            .unwrap()
    }

    fn panel() -> DateTimePanel {
        DateTimePanel::with_messages(value(), &Messages::for_locale("en-GB"), None).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let panel = panel();
        assert_eq!(panel.value().unwrap(), value());
        assert_eq!(panel.text(FieldId::Hour), "13");
        assert_eq!(panel.text(FieldId::Day), "15");
    }

    #[test]
    fn test_date_error_takes_precedence() {
        let mut panel = panel();
        panel.set_text(FieldId::Day, "32");
        panel.set_text(FieldId::Minute, "0");

        assert_eq!(
            panel.value().unwrap_err(),
            PanelError::invalid_date("2024", "3", "32")
        );

        panel.set_text(FieldId::Day, "31");
        assert_eq!(panel.value().unwrap_err(), PanelError::invalid_time("13", "0"));
        assert!(!panel.is_valid());

        panel.set_text(FieldId::Minute, "01");
        assert!(panel.is_valid());
    }

    #[test]
    fn test_hook_fires_once_per_edit_in_either_part() {
        let mut panel = panel();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let connection = panel.on_change(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        panel.set_text(FieldId::Year, "2025");
        panel.set_text(FieldId::Hour, "x");
        assert_eq!(count.load(Ordering::SeqCst), 2);

        assert!(panel.disconnect(connection));
        panel.set_text(FieldId::Minute, "15");
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(!panel.disconnect(connection));
    }

    #[test]
    fn test_placements() {
        let messages = Messages::for_locale("en-GB")
            .with_message(keys::DATE_PANEL_CONSTRAINTS, "cell 0 0")
            .with_message(keys::TIME_PANEL_CONSTRAINTS, "cell 2 0");
        let panel = DateTimePanel::with_messages(value(), &messages, Some("fill")).unwrap();

        assert_eq!(
            panel.placements(),
            vec![
                Placement::new(Component::DatePanel, "cell 0 0"),
                Placement::new(Component::spacer(), ""),
                Placement::new(Component::TimePanel, "cell 2 0"),
            ]
        );
        assert_eq!(panel.layout_constraints(), "gap 0 0, ins 0, fill");
        assert_eq!(
            panel.date_panel().layout_constraints(),
            "gap 0 0, ins 0 4 4 4, fill"
        );
    }
}
