//! Thread affinity checks for panel state.
//!
//! Panel fields are edited from a single UI thread. A panel may be built on
//! one thread and handed to another; the owning thread is the first one to
//! edit it. Later edits and change notifications assert, in debug builds,
//! that they run on that thread.
//!
//! ```
//! use datetime_panel_core::thread_check::ThreadAffinity;
//!
//! struct Field {
//!     owner: ThreadAffinity,
//!     text: String,
//! }
//!
//! impl Field {
//!     fn set_text(&mut self, text: &str) {
//!         self.owner.debug_assert_same_thread("set_text");
//!         self.text = text.to_string();
//!     }
//! }
//!
//! let mut field = Field { owner: ThreadAffinity::unbound(), text: String::new() };
//! std::thread::spawn(move || field.set_text("12")).join().unwrap();
//! ```

use std::sync::OnceLock;
use std::thread::{self, ThreadId};

/// The thread that owns a piece of panel state.
///
/// An unbound affinity is claimed by the first thread that asserts on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: OnceLock<ThreadId>,
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: OnceLock::from(thread::current().id()),
        }
    }

    /// Not yet bound to any thread.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// The owning thread, if one was bound.
    pub fn owner(&self) -> Option<ThreadId> {
        self.owner.get().copied()
    }

    /// Whether the calling thread owns this state, or could claim it.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        self.owner
            .get()
            .is_none_or(|&owner| owner == thread::current().id())
    }

    /// Hand ownership to the calling thread.
    ///
    /// Taking `&mut self` means no other thread can be using the state.
    pub fn rebind_to_current_thread(&mut self) {
        self.owner = OnceLock::from(thread::current().id());
    }

    /// Claim the state for the calling thread if unbound, otherwise panic
    /// unless called on the owner. `operation` names what was attempted,
    /// for the panic message.
    pub fn assert_same_thread(&self, operation: &str) {
        let current = thread::current().id();
        let owner = *self.owner.get_or_init(|| current);
        if owner != current {
            wrong_thread(operation, owner);
        }
    }

    /// [`assert_same_thread`](Self::assert_same_thread) in debug builds, a
    /// no-op otherwise.
    #[inline]
    pub fn debug_assert_same_thread(&self, operation: &str) {
        #[cfg(debug_assertions)]
        self.assert_same_thread(operation);
        #[cfg(not(debug_assertions))]
        let _ = operation;
    }
}

#[cold]
#[inline(never)]
fn wrong_thread(operation: &str, owner: ThreadId) -> ! {
    let current = thread::current();
    panic!(
        "{operation} called on thread {:?} ({}), but the panel belongs to thread {owner:?}",
        current.id(),
        current.name().unwrap_or("unnamed"),
    )
}
