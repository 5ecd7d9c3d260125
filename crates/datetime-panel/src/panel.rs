//! Behavior shared by the date, time and date-time panels.

use datetime_panel_core::logging::targets;

use crate::error::Result;
use crate::field::FieldId;
use crate::layout::{self, LayoutSink, Placement};
use crate::messages::{MessageSource, caption_key, constraints_key, tooltip_key};

/// A panel whose fields compose a single value.
///
/// `value` is the only fallible operation; `is_valid` is defined as "`value`
/// succeeds" and never reports an error.
pub trait Panel {
    /// The composed value.
    type Value;

    /// Compose the value from the current field texts.
    fn value(&self) -> Result<Self::Value>;

    /// Check whether the fields currently compose a value.
    fn is_valid(&self) -> bool {
        self.value().is_ok()
    }

    /// Constraints for the panel's own layout.
    fn layout_constraints(&self) -> &str;

    /// The panel's content, in layout order.
    fn placements(&self) -> Vec<Placement>;

    /// Hand the panel's content to a layout sink.
    fn lay_out(&self, sink: &mut dyn LayoutSink) {
        layout::emit(&self.placements(), sink);
    }
}

/// Caption, tooltip and placement constraints of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldText {
    pub field: FieldId,
    pub caption: String,
    pub tooltip: String,
    pub constraints: String,
}

impl FieldText {
    /// Resolve a field's text from a message source.
    ///
    /// Missing captions fall back to the field name, missing tooltips and
    /// constraints to an empty string.
    pub fn resolve(source: &dyn MessageSource, field: FieldId) -> Self {
        Self {
            field,
            caption: lookup_or(source, &caption_key(field), field.key()),
            tooltip: lookup_or(source, &tooltip_key(field), ""),
            constraints: lookup_or(source, &constraints_key(field), ""),
        }
    }
}

/// Look up a message, logging and substituting `default` when it is missing.
pub(crate) fn lookup_or(source: &dyn MessageSource, key: &str, default: &str) -> String {
    source.message(key).unwrap_or_else(|| {
        tracing::warn!(target: targets::CONFIG, key, default, "message missing, using default");
        default.to_string()
    })
}
