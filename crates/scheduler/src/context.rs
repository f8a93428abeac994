//! Per-firing execution context.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use cronhost_core::Config;

/// Read-only view of host services shared with every job firing.
///
/// Passed to the registry at construction; the registry never holds a
/// mutable back-pointer into the host.
#[derive(Clone)]
pub struct SharedServices {
    config: Arc<Config>,
}

impl SharedServices {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Ephemeral value handed to a job callback, one fresh instance per firing.
///
/// Carries read-only access to shared host services and the scheduled
/// instant this firing corresponds to. It does not know which registry
/// entry it belongs to.
pub struct JobContext {
    services: SharedServices,
    fired_at: DateTime<Utc>,
}

impl JobContext {
    pub(crate) fn new(services: SharedServices, fired_at: DateTime<Utc>) -> Self {
        Self { services, fired_at }
    }

    pub fn services(&self) -> &SharedServices {
        &self.services
    }

    pub fn config(&self) -> &Config {
        self.services.config()
    }

    /// The scheduled instant this firing was due at (not the wall-clock
    /// moment the callback started running).
    pub fn fired_at(&self) -> DateTime<Utc> {
        self.fired_at
    }
}
