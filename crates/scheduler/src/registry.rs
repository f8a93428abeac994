//! [`JobRegistry`]: named-job table over the trigger engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use cronhost_core::config::SchedulerConfig;
use cronhost_core::error::SchedulerError;

use crate::context::{JobContext, SharedServices};
use crate::engine::TriggerEngine;
use crate::entry::TriggerId;
use crate::timespec;

/// Maps caller-assigned job names to trigger handles.
///
/// Exclusively owns its [`TriggerEngine`]; no other component touches
/// trigger handles. All operations are non-fatal: bad registrations and
/// unknown removals are reported on the diagnostic channel and skipped.
/// Safe to share behind an `Arc` between HTTP handlers and job callbacks.
pub struct JobRegistry {
    engine: TriggerEngine,
    jobs: Mutex<HashMap<String, TriggerId>>,
}

impl JobRegistry {
    pub fn new(services: SharedServices, config: &SchedulerConfig) -> Self {
        Self {
            engine: TriggerEngine::new(services, config),
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Register a job.
    ///
    /// `spec` is a 6-field time specification (see [`timespec::parse_spec`]).
    /// A malformed spec creates no job. A non-empty `name` that is already
    /// registered is skipped (first registration wins), so a running job is
    /// never clobbered by a later registration under the same name. An empty
    /// `name` registers the job anonymously: it fires on schedule but is
    /// never listed, counted, or removable.
    pub fn add<F>(&self, spec: &str, name: &str, callback: F)
    where
        F: Fn(JobContext) + Send + Sync + 'static,
    {
        let schedule = match timespec::parse_spec(spec) {
            Ok(s) => s,
            Err(e) => {
                error!(name = %name, spec = %spec, error = %e, "failed to add job - job will not run");
                return;
            }
        };

        // Hold the table lock across the engine insert so two concurrent
        // adds under the same name cannot both pass the uniqueness check.
        let mut jobs = self.jobs.lock().expect("job table lock poisoned");

        if name.is_empty() {
            let id = self.engine.insert(None, schedule, Arc::new(callback));
            info!(spec = %spec, id = %id, "anonymous job added");
            return;
        }

        if jobs.contains_key(name) {
            let err = SchedulerError::DuplicateName(name.to_string());
            warn!(spec = %spec, error = %err, "skipping job addition");
            return;
        }

        let id = self
            .engine
            .insert(Some(name.to_string()), schedule, Arc::new(callback));
        jobs.insert(name.to_string(), id);
        info!(name = %name, spec = %spec, id = %id, count = jobs.len(), "job added");
    }

    /// Remove a job by name. Idempotent: removing an unknown name is a
    /// warned no-op, never an error.
    pub fn remove(&self, name: &str) {
        let removed = self
            .jobs
            .lock()
            .expect("job table lock poisoned")
            .remove(name);
        match removed {
            Some(id) => {
                self.engine.cancel(id);
                info!(name = %name, id = %id, "job removed");
            }
            None => {
                let err = SchedulerError::NotFound(name.to_string());
                warn!(error = %err, "remove is a no-op");
            }
        }
    }

    /// Names of all registered named jobs, in no particular order.
    pub fn list_jobs(&self) -> Vec<String> {
        self.jobs
            .lock()
            .expect("job table lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Number of named jobs (anonymous registrations are not counted).
    pub fn jobs_count(&self) -> usize {
        self.jobs.lock().expect("job table lock poisoned").len()
    }

    /// Start firing due triggers. Idempotent.
    pub fn start(&self) {
        self.engine.start();
    }

    /// Stop firing. Idempotent; leaves the job table intact and does not
    /// interrupt in-flight callbacks.
    pub fn stop(&self) {
        self.engine.stop();
    }
}
