use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{Instrument, info, info_span};

use crate::method::Method;
use crate::response::Response;

/// Runs `next` inside a `request` span and logs its status and latency.
pub(crate) async fn trace<F>(method: Method, path: &str, next: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, path);
    let started = Instant::now();

    let response = next.instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = response.status_code(),
            latency_us = micros(started.elapsed()),
            "handled"
        );
    });
    response
}

/// Whole microseconds, saturating at `u64::MAX`.
fn micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}
