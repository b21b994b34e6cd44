//! Liveness endpoint.

use chrono::Utc;

/// GET /api/heartbeat - Basic liveness probe.
///
/// Returns 200 with a timestamp immediately. Does not touch the store.
pub async fn heartbeat() -> String {
    format!("Heartbeat: {}", Utc::now().to_rfc3339())
}
