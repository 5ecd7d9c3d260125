//! Plumbing shared by the datetime panels.
//!
//! - [`Signal`]: synchronous, ordered change notification
//! - [`ThreadAffinity`]: checks that panel state is only touched from the
//!   one thread that edits it
//! - [`logging::targets`]: `tracing` target names used across the workspace

pub mod logging;
pub mod signal;
pub mod thread_check;

pub use signal::{ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
