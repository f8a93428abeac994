//! Named-job registry on top of a cron-style trigger engine.
//!
//! The [`JobRegistry`] maps caller-assigned job names to trigger handles and
//! enforces name uniqueness; the trigger engine underneath runs a dispatch
//! loop that fires due callbacks at seconds resolution. The registry is
//! designed to be shared (`Arc`) between HTTP handlers and job callbacks, so
//! a handler can remove a running job and a callback can call back into the
//! registry without deadlocking.

mod context;
mod engine;
mod entry;
mod registry;
pub mod timespec;


pub use context::{JobContext, SharedServices};
pub use entry::TriggerId;
pub use registry::JobRegistry;
