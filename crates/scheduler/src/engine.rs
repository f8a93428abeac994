//! Trigger engine: owns the trigger table and runs the dispatch loop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use cron::Schedule;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use cronhost_core::config::{OverlapPolicy, SchedulerConfig};

use crate::context::{JobContext, SharedServices};
use crate::entry::{JobCallback, TriggerEntry, TriggerId};
use crate::timespec;

/// Owns the active (handle, schedule, callback) triples and fires due
/// callbacks from a background dispatch loop.
///
/// The trigger table lock is held only while scanning for due entries and
/// mutating membership, never across callback execution, so callbacks may
/// call back into the engine freely.
pub(crate) struct TriggerEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    triggers: Mutex<HashMap<TriggerId, TriggerEntry>>,
    next_id: AtomicU64,
    running: AtomicBool,
    loop_task: Mutex<Option<JoinHandle<()>>>,
    services: SharedServices,
    tick_interval: Duration,
    overlap_policy: OverlapPolicy,
}

impl TriggerEngine {
    pub fn new(services: SharedServices, config: &SchedulerConfig) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                triggers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                running: AtomicBool::new(false),
                loop_task: Mutex::new(None),
                services,
                tick_interval: Duration::from_millis(config.tick_interval_ms),
                overlap_policy: config.overlap_policy,
            }),
        }
    }

    /// Register a trigger. Takes effect immediately, whether or not the
    /// dispatch loop is running.
    pub fn insert(&self, name: Option<String>, schedule: Schedule, callback: JobCallback) -> TriggerId {
        let id = TriggerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let entry = TriggerEntry::new(name, schedule, callback);
        self.inner
            .triggers
            .lock()
            .expect("trigger table lock poisoned")
            .insert(id, entry);
        id
    }

    /// Cancel a trigger. Unknown handles are ignored.
    pub fn cancel(&self, id: TriggerId) {
        self.inner
            .triggers
            .lock()
            .expect("trigger table lock poisoned")
            .remove(&id);
    }

    /// Start the dispatch loop. No-op if already running.
    ///
    /// Every registered trigger's `last_fire` is reset to now, so a
    /// stop/start cycle resumes from the next scheduled instant instead of
    /// replaying ticks that elapsed while stopped.
    pub fn start(&self) {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return;
        }

        let now = Utc::now();
        for entry in self
            .inner
            .triggers
            .lock()
            .expect("trigger table lock poisoned")
            .values_mut()
        {
            entry.last_fire = now;
        }

        let inner = self.inner.clone();
        let handle = tokio::spawn(dispatch_loop(inner));
        *self
            .inner
            .loop_task
            .lock()
            .expect("loop task lock poisoned") = Some(handle);
        info!("trigger engine started");
    }

    /// Stop the dispatch loop. No-op if not running. In-flight firings are
    /// not interrupted; the trigger table is left intact.
    pub fn stop(&self) {
        if !self.inner.running.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(handle) = self
            .inner
            .loop_task
            .lock()
            .expect("loop task lock poisoned")
            .take()
        {
            handle.abort();
        }
        info!("trigger engine stopped");
    }
}

impl Drop for TriggerEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn dispatch_loop(inner: Arc<EngineInner>) {
    let mut ticker = tokio::time::interval(inner.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if !inner.running.load(Ordering::SeqCst) {
            break;
        }
        fire_due(&inner, Utc::now());
    }
}

/// Scan the table for due triggers and spawn one task per firing.
fn fire_due(inner: &Arc<EngineInner>, now: DateTime<Utc>) {
    let mut due = Vec::new();
    {
        let mut triggers = inner.triggers.lock().expect("trigger table lock poisoned");
        for (id, entry) in triggers.iter_mut() {
            let next = match timespec::next_due(&entry.schedule, &entry.last_fire) {
                Some(t) => t,
                None => continue, // schedule has no future instants
            };
            if next > now {
                continue;
            }
            entry.last_fire = next;

            if inner.overlap_policy == OverlapPolicy::Skip
                && entry.in_flight.load(Ordering::SeqCst)
            {
                debug!(
                    job = entry.name.as_deref().unwrap_or("<anonymous>"),
                    "previous firing still running - skipping tick"
                );
                continue;
            }

            due.push((
                *id,
                entry.name.clone(),
                entry.callback.clone(),
                entry.in_flight.clone(),
                next,
            ));
        }
    }

    // Lock released: firings run outside the table lock so callbacks can
    // call back into add/remove.
    for (id, name, callback, in_flight, fired_at) in due {
        let label = name.unwrap_or_else(|| format!("<anonymous:{}>", id));
        let ctx = JobContext::new(inner.services.clone(), fired_at);
        in_flight.store(true, Ordering::SeqCst);
        tokio::spawn(async move {
            let run = tokio::spawn(async move { callback(ctx) });
            if let Err(e) = run.await {
                warn!(job = %label, error = %e, "job callback panicked");
            }
            in_flight.store(false, Ordering::SeqCst);
        });
    }
}
