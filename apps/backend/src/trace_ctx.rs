//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; error rendering and DB error mapping read
//! it so problem details and warn lines carry the same id.

use std::future::Future;

use tokio::task_local;

/// Reported when no request scope is active (startup, background tasks).
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

pub fn trace_id() -> String {
    TRACE_ID
        .try_with(String::clone)
        .unwrap_or_else(|_| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `trace_id` visible to everything it awaits.
pub async fn with_trace_id<F: Future>(trace_id: String, future: F) -> F::Output {
    TRACE_ID.scope(trace_id, future).await
}
