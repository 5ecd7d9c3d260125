//! Observer lists for panel notifications.
//!
//! A [`Signal`] holds the hooks registered for one kind of notification.
//! Emitting it calls every hook synchronously, on the emitting thread, in the
//! order the hooks were connected. Nothing is queued or deferred.
//!
//! ```
//! use datetime_panel_core::Signal;
//!
//! let edited = Signal::<String>::new();
//! let id = edited.connect(|text| println!("field now reads {text:?}"));
//!
//! edited.emit("2024".to_string());
//! assert!(edited.disconnect(id));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Handle to one connected hook, used to disconnect it again.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Connected hooks plus the order they were connected in.
///
/// `SlotMap` reuses freed slots, so its iteration order does not follow
/// connection order once something was disconnected.
struct Connections<Args> {
    slots: SlotMap<ConnectionId, Slot<Args>>,
    order: Vec<ConnectionId>,
}

/// An ordered list of hooks taking `&Args`.
///
/// Hooks are collected before the first one runs, so a hook may connect or
/// disconnect hooks on the same signal; the change applies from the next
/// emission on.
pub struct Signal<Args> {
    connections: Mutex<Connections<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// An empty signal.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Connections {
                slots: SlotMap::with_key(),
                order: Vec::new(),
            }),
        }
    }

    /// Append a hook. It runs after every hook connected before it.
    pub fn connect<F>(&self, hook: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let mut connections = self.connections.lock();
        let id = connections.slots.insert(Arc::new(hook));
        connections.order.push(id);
        id
    }

    /// Remove a hook. Returns `false` if `id` was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut connections = self.connections.lock();
        let removed = connections.slots.remove(id).is_some();
        if removed {
            connections.order.retain(|&other| other != id);
        }
        removed
    }

    /// Number of connected hooks.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().slots.len()
    }

    /// Call every hook with `args`, in connection order.
    pub fn emit(&self, args: Args) {
        let hooks: Vec<Slot<Args>> = {
            let connections = self.connections.lock();
            connections
                .order
                .iter()
                .filter_map(|&id| connections.slots.get(id).cloned())
                .collect()
        };
        tracing::trace!(target: targets::SIGNAL, hooks = hooks.len(), "emit");

        for hook in hooks {
            hook(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    type Recorded<T> = Arc<Mutex<Vec<T>>>;

    fn recorder<T: Clone + Send + 'static>() -> (Recorded<T>, impl Fn(&T) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |value: &T| sink.lock().push(value.clone()))
    }

    #[test]
    fn test_emit_reaches_every_hook() {
        let edited = Signal::<String>::new();
        let (first, hook) = recorder::<String>();
        edited.connect(hook);
        let (second, hook) = recorder::<String>();
        edited.connect(hook);

        edited.emit("15".to_string());
        edited.emit("16".to_string());

        assert_eq!(*first.lock(), vec!["15", "16"]);
        assert_eq!(*second.lock(), vec!["15", "16"]);
        assert_eq!(edited.connection_count(), 2);
    }

    #[test]
    fn test_disconnected_hook_is_skipped() {
        let edited = Signal::<u8>::new();
        let (seen, hook) = recorder::<u8>();
        let id = edited.connect(hook);

        edited.emit(1);
        assert!(edited.disconnect(id));
        assert!(!edited.disconnect(id));
        edited.emit(2);

        assert_eq!(*seen.lock(), vec![1]);
        assert_eq!(edited.connection_count(), 0);
    }

    #[test]
    fn test_reused_slot_keeps_connection_order() {
        let edited = Signal::<()>::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let mut ids = Vec::new();
        for name in ["day", "month", "year"] {
            let calls = calls.clone();
            ids.push(edited.connect(move |_| calls.lock().push(name)));
        }

        edited.disconnect(ids[0]);
        let calls_clone = calls.clone();
        edited.connect(move |_| calls_clone.lock().push("hour"));

        edited.emit(());
        assert_eq!(*calls.lock(), vec!["month", "year", "hour"]);
    }

    #[test]
    fn test_hook_connected_during_emit_runs_next_time() {
        let edited = Arc::new(Signal::<()>::new());
        let late_calls = Arc::new(Mutex::new(0));

        let edited_clone = edited.clone();
        let late_clone = late_calls.clone();
        edited.connect(move |_| {
            let late = late_clone.clone();
            edited_clone.connect(move |_| *late.lock() += 1);
        });

        edited.emit(());
        assert_eq!(*late_calls.lock(), 0);
        edited.emit(());
        assert_eq!(*late_calls.lock(), 1);
    }

    #[test]
    fn test_tuple_payload() {
        let appearance = Signal::<(&'static str, bool)>::new();
        let (seen, hook) = recorder::<(&'static str, bool)>();
        appearance.connect(hook);

        appearance.emit(("minute", false));
        assert_eq!(*seen.lock(), vec![("minute", false)]);
    }
}
