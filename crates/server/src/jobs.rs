//! Built-in jobs registered at boot.

use std::sync::Arc;

use tracing::info;

use crate::state::AppState;

/// Register the host's periodic jobs.
///
/// The report job holds a `Weak` back to the registry: a stored callback
/// owning an `Arc` of the registry that stores it would never be dropped.
pub fn register_builtin_jobs(state: &Arc<AppState>) {
    state.registry.add("*/5 * * * * *", "heartbeat", |ctx| {
        info!(fired_at = %ctx.fired_at().to_rfc3339(), "heartbeat");
    });

    let registry = Arc::downgrade(&state.registry);
    state.registry.add("*/10 * * * * *", "jobs-report", move |ctx| {
        if let Some(registry) = registry.upgrade() {
            info!(
                count = registry.jobs_count(),
                fired_at = %ctx.fired_at().to_rfc3339(),
                "scheduled jobs report"
            );
        }
    });
}
