use std::sync::Arc;

use chrono::{DateTime, Utc};

use cronhost_core::Config;
use cronhost_scheduler::{JobRegistry, SharedServices};

/// Shared application state: the one live job registry plus config.
///
/// Owned for the process lifetime; handlers and job callbacks both reach the
/// registry through this.
pub struct AppState {
    pub registry: Arc<JobRegistry>,
    pub config: Config,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let services = SharedServices::new(Arc::new(config.clone()));
        let registry = Arc::new(JobRegistry::new(services, &config.scheduler));
        Self {
            registry,
            config,
            started_at: Utc::now(),
        }
    }
}
