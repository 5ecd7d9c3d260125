//! Layout emission.
//!
//! Panels do not measure or draw anything. They describe their content as an
//! ordered list of [`Placement`]s, each a component plus the constraint
//! string the external layout engine understands, and hand that list to a
//! [`LayoutSink`].
//!
//! A date panel in day-month-year order emits:
//!
//! ```text
//! Caption(day)    "<day>, span 2"
//! Caption(month)  "<month>, span 2"
//! Caption(year)   "<year>, wrap"
//! Field(day)      "<day>"
//! Separator("/")  ""
//! Field(month)    "<month>"
//! Separator("/")  ""
//! Field(year)     "<year>, wrap"
//! ```

use std::fmt;

use datetime_panel_core::logging::targets;

use crate::field::FieldId;

/// Something a panel places into its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// The label above a field.
    Caption {
        /// The labelled field.
        field: FieldId,
        /// Label text.
        text: String,
    },
    /// An editable text field.
    Field(FieldId),
    /// Static text between fields, or a spacer when blank.
    Separator(String),
    /// The AM/PM selector of a 12-hour time panel.
    MeridiemSelector,
    /// A nested date panel.
    DatePanel,
    /// A nested time panel.
    TimePanel,
}

impl Component {
    /// A blank spacer.
    pub fn spacer() -> Self {
        Component::Separator(" ".to_string())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Caption { field, text } => write!(f, "caption({field}: {text:?})"),
            Component::Field(field) => write!(f, "field({field})"),
            Component::Separator(text) => write!(f, "separator({text:?})"),
            Component::MeridiemSelector => f.write_str("meridiem"),
            Component::DatePanel => f.write_str("date-panel"),
            Component::TimePanel => f.write_str("time-panel"),
        }
    }
}

/// A component together with its placement constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub component: Component,
    pub constraints: String,
}

impl Placement {
    /// Create a placement.
    pub fn new(component: Component, constraints: impl Into<String>) -> Self {
        Self {
            component,
            constraints: constraints.into(),
        }
    }
}

/// Receiver of placements, implemented by the rendering side.
pub trait LayoutSink {
    /// Place one component with the given constraints.
    fn place(&mut self, component: &Component, constraints: &str);
}

impl LayoutSink for Vec<Placement> {
    fn place(&mut self, component: &Component, constraints: &str) {
        self.push(Placement::new(component.clone(), constraints));
    }
}

impl<S: LayoutSink + ?Sized> LayoutSink for &mut S {
    fn place(&mut self, component: &Component, constraints: &str) {
        (**self).place(component, constraints);
    }
}

/// Hand placements to a sink, in order.
pub(crate) fn emit(placements: &[Placement], sink: &mut dyn LayoutSink) {
    tracing::trace!(target: targets::LAYOUT, count = placements.len(), "emitting placements");
    for placement in placements {
        sink.place(&placement.component, &placement.constraints);
    }
}

/// Join a base constraint with a suffix, skipping an empty base.
pub(crate) fn constraint(base: &str, suffix: &str) -> String {
    match (base.is_empty(), suffix.is_empty()) {
        (_, true) => base.to_string(),
        (true, false) => suffix.to_string(),
        (false, false) => format!("{base}, {suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_joining() {
        assert_eq!(constraint("w 28!", "span 2"), "w 28!, span 2");
        assert_eq!(constraint("", "wrap"), "wrap");
        assert_eq!(constraint("w 28!", ""), "w 28!");
        assert_eq!(constraint("", ""), "");
    }

    #[test]
    fn test_emit_preserves_order() {
        let placements = vec![
            Placement::new(Component::Field(FieldId::Hour), "a"),
            Placement::new(Component::Separator(" : ".into()), ""),
            Placement::new(Component::Field(FieldId::Minute), "b"),
        ];

        let mut sink: Vec<Placement> = Vec::new();
        emit(&placements, &mut sink);
        assert_eq!(sink, placements);
    }

    #[test]
    fn test_component_display() {
        assert_eq!(Component::Field(FieldId::Day).to_string(), "field(day)");
        assert_eq!(Component::spacer().to_string(), "separator(\" \")");
        assert_eq!(
            Component::Caption {
                field: FieldId::Year,
                text: "Year".into()
            }
            .to_string(),
            "caption(year: \"Year\")"
        );
    }
}
