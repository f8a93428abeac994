//! Trigger handle and per-trigger state.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cron::Schedule;

use crate::context::JobContext;

/// Callback invoked on each firing of a job.
pub type JobCallback = Arc<dyn Fn(JobContext) + Send + Sync>;

/// Opaque handle to a live trigger inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerId(pub(crate) u64);

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State for a single registered trigger.
pub(crate) struct TriggerEntry {
    /// Job name for diagnostics (`None` for anonymous registrations).
    pub name: Option<String>,
    pub schedule: Schedule,
    pub callback: JobCallback,
    /// Most recent scheduled instant this trigger fired for. Initialized to
    /// the registration time so instants before registration never fire.
    pub last_fire: DateTime<Utc>,
    /// Set while a firing of this trigger is still running.
    pub in_flight: Arc<AtomicBool>,
}

impl TriggerEntry {
    pub fn new(name: Option<String>, schedule: Schedule, callback: JobCallback) -> Self {
        Self {
            name,
            schedule,
            callback,
            last_fire: Utc::now(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }
}
