//! Editable fields and the validation registry.
//!
//! Every panel owns a [`FieldGroup`]: its fields, the set of fields whose last
//! verification failed, and the signals that announce edits. All edits go
//! through [`FieldGroup::edit`], which
//!
//! 1. stores the new raw text,
//! 2. re-runs the field's verifier,
//! 3. adds the field to, or removes it from, the [`ValidationRegistry`],
//! 4. publishes the field's appearance (`Invalid` or `Normal`),
//! 5. fires every change hook, whether or not the text verified.
//!
//! The registry, not a field's own verdict, decides whether a panel is
//! valid. Seeding a field with its initial value is not an edit: it neither
//! touches the registry nor fires hooks.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use datetime_panel_core::logging::targets;
use datetime_panel_core::{ConnectionId, Signal, ThreadAffinity};

use crate::verifier::{FieldVerifier, Verifier};

/// Identifier of one editable text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl FieldId {
    /// Name used to build message keys (`"day.caption"`, `"day.tooltip"`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            FieldId::Year => "year",
            FieldId::Month => "month",
            FieldId::Day => "day",
            FieldId::Hour => "hour",
            FieldId::Minute => "minute",
        }
    }

    /// Whether this field belongs to the date part.
    pub fn is_date_field(&self) -> bool {
        matches!(self, FieldId::Year | FieldId::Month | FieldId::Day)
    }

    /// Whether this field belongs to the time part.
    pub fn is_time_field(&self) -> bool {
        matches!(self, FieldId::Hour | FieldId::Minute)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Visual state of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldAppearance {
    #[default]
    Normal,
    /// The field needs attention: its last verification failed.
    Invalid,
}

/// Receiver for field appearance updates, implemented by the rendering side.
pub trait AppearanceSink: Send + Sync {
    /// The field's last verification failed.
    fn mark_invalid(&self, field: FieldId);
    /// The field's last verification passed.
    fn mark_normal(&self, field: FieldId);
}

/// Payload delivered to change hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// The edited field.
    pub field: FieldId,
    /// The field's raw text after the edit.
    pub text: String,
    /// Whether the text verified.
    pub valid: bool,
}

/// One editable field: raw text plus its verifier.
#[derive(Debug, Clone)]
pub struct FieldState {
    id: FieldId,
    text: String,
    verifier: FieldVerifier,
    appearance: FieldAppearance,
}

impl FieldState {
    /// Create a field seeded with `text`. Seeding does not verify.
    pub fn new(id: FieldId, text: impl Into<String>, verifier: FieldVerifier) -> Self {
        Self {
            id,
            text: text.into(),
            verifier,
            appearance: FieldAppearance::Normal,
        }
    }

    /// The field's identifier.
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The current raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The verifier attached to this field.
    pub fn verifier(&self) -> &FieldVerifier {
        &self.verifier
    }

    /// Whether the current text passes the verifier.
    ///
    /// Always computed from the current text, including the seed value.
    pub fn is_valid(&self) -> bool {
        self.verifier.verify(&self.text)
    }

    /// The appearance set by the last edit.
    pub fn appearance(&self) -> FieldAppearance {
        self.appearance
    }

    /// Whether the last edit left the field marked invalid.
    pub fn needs_attention(&self) -> bool {
        self.appearance == FieldAppearance::Invalid
    }

    /// Replace the text and verify it, returning the verdict.
    fn set_text(&mut self, text: String) -> bool {
        self.text = text;
        let verified = self.is_valid();
        self.appearance = if verified {
            FieldAppearance::Normal
        } else {
            FieldAppearance::Invalid
        };
        verified
    }
}

/// The set of fields in one panel whose most recent verification failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationRegistry {
    invalid: BTreeSet<FieldId>,
}

impl ValidationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verification result for a field.
    pub fn record(&mut self, field: FieldId, verified: bool) {
        if verified {
            self.invalid.remove(&field);
        } else {
            self.invalid.insert(field);
        }
    }

    /// Whether the field is currently registered as invalid.
    pub fn contains(&self, field: FieldId) -> bool {
        self.invalid.contains(&field)
    }

    /// True when no field is registered as invalid.
    pub fn is_empty(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.invalid.len()
    }

    /// Invalid fields, in `FieldId` order.
    pub fn iter(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.invalid.iter().copied()
    }
}

/// Fields of one panel together with their registry and signals.
///
/// Hooks are connected through the panels. The signals themselves stay
/// inside the crate, so nothing outside can announce an edit that did not
/// happen:
///
/// ```compile_fail
/// use chrono::NaiveDate;
/// use datetime_panel::prelude::*;
///
/// let config = PanelConfig::new().with_locale("en-GB");
/// let panel = DatePanel::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), &config).unwrap();
/// let _ = &panel.fields().changed;
/// ```
pub struct FieldGroup {
    fields: Vec<FieldState>,
    registry: ValidationRegistry,
    affinity: ThreadAffinity,
    /// Emitted on every edit, after the registry was updated.
    pub(crate) changed: Signal<FieldChange>,
    /// Emitted on every edit with the field's new appearance.
    pub(crate) appearance_changed: Signal<(FieldId, FieldAppearance)>,
}

impl FieldGroup {
    /// Create a group from seeded fields.
    ///
    /// The group belongs to whichever thread edits it first.
    pub fn new(fields: Vec<FieldState>) -> Self {
        Self {
            fields,
            registry: ValidationRegistry::new(),
            affinity: ThreadAffinity::unbound(),
            changed: Signal::new(),
            appearance_changed: Signal::new(),
        }
    }

    /// Look up a field of this group.
    pub fn field(&self, id: FieldId) -> Option<&FieldState> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// The raw text of a field, or `""` if the group has no such field.
    pub fn text(&self, id: FieldId) -> &str {
        self.field(id).map(FieldState::text).unwrap_or_default()
    }

    /// All fields, in creation order.
    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    /// The group's validation registry.
    pub fn registry(&self) -> &ValidationRegistry {
        &self.registry
    }

    /// Whether the field is part of this group.
    pub fn contains(&self, id: FieldId) -> bool {
        self.field(id).is_some()
    }

    /// Apply an edit to a field.
    ///
    /// Returns the verifier's verdict, or `None` if the group has no such
    /// field (nothing is changed or emitted in that case).
    pub fn edit(&mut self, id: FieldId, text: impl Into<String>) -> Option<bool> {
        self.affinity.debug_assert_same_thread("field edit");

        let field = self.fields.iter_mut().find(|field| field.id == id)?;
        let verified = field.set_text(text.into());
        let text = field.text.clone();
        let appearance = field.appearance;

        self.registry.record(id, verified);
        tracing::debug!(
            target: targets::FIELD,
            field = %id,
            text = %text,
            verified,
            invalid_fields = self.registry.len(),
            "field edited"
        );

        self.appearance_changed.emit((id, appearance));
        self.changed.emit(FieldChange {
            field: id,
            text,
            valid: verified,
        });
        Some(verified)
    }

    /// Fire the change hooks without a text edit, e.g. for a selector change.
    pub(crate) fn notify(&self, change: FieldChange) {
        self.affinity.debug_assert_same_thread("change notification");
        self.changed.emit(change);
    }

    /// Hand the group to the calling thread after it was edited elsewhere.
    pub(crate) fn rebind_to_current_thread(&mut self) {
        self.affinity.rebind_to_current_thread();
    }

    /// Register a change hook.
    pub fn on_change<F>(&self, hook: F) -> ConnectionId
    where
        F: Fn(&FieldChange) + Send + Sync + 'static,
    {
        self.changed.connect(hook)
    }

    /// Forward appearance updates to a sink.
    pub fn connect_appearance(&self, sink: Arc<dyn AppearanceSink>) -> ConnectionId {
        self.appearance_changed
            .connect(move |&(field, appearance)| match appearance {
                FieldAppearance::Invalid => sink.mark_invalid(field),
                FieldAppearance::Normal => sink.mark_normal(field),
            })
    }
}

impl fmt::Debug for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldGroup")
            .field("fields", &self.fields)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date_group() -> FieldGroup {
        FieldGroup::new(vec![
            FieldState::new(FieldId::Year, "2024", FieldVerifier::year()),
            FieldState::new(FieldId::Month, "3", FieldVerifier::month()),
            FieldState::new(FieldId::Day, "15", FieldVerifier::day()),
        ])
    }

    #[test]
    fn test_seeding_does_not_register() {
        let group = FieldGroup::new(vec![FieldState::new(
            FieldId::Minute,
            "00",
            FieldVerifier::minute(),
        )]);
        assert!(group.registry().is_empty());
        assert!(!group.field(FieldId::Minute).unwrap().is_valid());
        assert!(!group.field(FieldId::Minute).unwrap().needs_attention());
    }

    #[test]
    fn test_edit_updates_registry() {
        let mut group = date_group();

        assert_eq!(group.edit(FieldId::Day, "32"), Some(false));
        assert!(group.registry().contains(FieldId::Day));
        assert!(group.field(FieldId::Day).unwrap().needs_attention());

        assert_eq!(group.edit(FieldId::Month, "13"), Some(false));
        assert_eq!(
            group.registry().iter().collect::<Vec<_>>(),
            vec![FieldId::Month, FieldId::Day]
        );

        assert_eq!(group.edit(FieldId::Day, "31"), Some(true));
        assert!(!group.registry().contains(FieldId::Day));
        assert_eq!(group.registry().len(), 1);
        assert_eq!(group.text(FieldId::Day), "31");
    }

    #[test]
    fn test_edit_unknown_field_is_ignored() {
        let mut group = date_group();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        group.on_change(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(group.edit(FieldId::Hour, "5"), None);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(group.text(FieldId::Hour), "");
    }

    #[test]
    fn test_hooks_fire_once_per_edit_regardless_of_validity() {
        let mut group = date_group();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        group.on_change(move |change| changes_clone.lock().push(change.clone()));

        group.edit(FieldId::Day, "x");
        group.edit(FieldId::Day, "1");
        group.edit(FieldId::Day, "1");

        let changes = changes.lock();
        assert_eq!(changes.len(), 3);
        assert!(!changes[0].valid);
        assert!(changes[1].valid);
        assert_eq!(changes[2].text, "1");
    }

    #[test]
    fn test_hook_payload_matches_registry() {
        let mut group = date_group();
        let seen = Arc::new(Mutex::new(None));
        let seen_clone = seen.clone();
        group.on_change(move |change| *seen_clone.lock() = Some(change.valid));

        group.edit(FieldId::Year, "1999");
        assert_eq!(*seen.lock(), Some(false));
        assert!(group.registry().contains(FieldId::Year));
    }

    struct RecordingSink(Mutex<Vec<(FieldId, FieldAppearance)>>);

    impl AppearanceSink for RecordingSink {
        fn mark_invalid(&self, field: FieldId) {
            self.0.lock().push((field, FieldAppearance::Invalid));
        }

        fn mark_normal(&self, field: FieldId) {
            self.0.lock().push((field, FieldAppearance::Normal));
        }
    }

    #[test]
    fn test_appearance_sink() {
        let mut group = date_group();
        let sink = Arc::new(RecordingSink(Mutex::new(Vec::new())));
        group.connect_appearance(sink.clone());

        group.edit(FieldId::Month, "0");
        group.edit(FieldId::Month, "10");

        assert_eq!(
            *sink.0.lock(),
            vec![
                (FieldId::Month, FieldAppearance::Invalid),
                (FieldId::Month, FieldAppearance::Normal),
            ]
        );
    }

    #[test]
    fn test_group_edited_on_other_thread() {
        let group = date_group();
        let outcome = std::thread::spawn(move || {
            let mut group = group;
            group.edit(FieldId::Day, "16")
        })
        .join();
        assert!(matches!(outcome, Ok(Some(true))));
    }

    #[test]
    fn test_rebind_after_edit() {
        let mut group = date_group();
        group.edit(FieldId::Day, "16");

        let outcome = std::thread::spawn(move || {
            let mut group = group;
            group.rebind_to_current_thread();
            group.edit(FieldId::Day, "17")
        })
        .join();
        assert!(matches!(outcome, Ok(Some(true))));
    }

    #[test]
    fn test_field_keys() {
        assert_eq!(FieldId::Day.key(), "day");
        assert_eq!(FieldId::Minute.to_string(), "minute");
        assert!(FieldId::Year.is_date_field());
        assert!(FieldId::Hour.is_time_field());
        assert!(!FieldId::Hour.is_date_field());
    }
}
