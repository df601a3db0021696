use tokio::time::Instant;
use tracing::trace;

/// Times one routed operation, failover retry included
///
/// The elapsed time is emitted under the `timing` target when the timer
/// goes out of scope, whichever way `invoke` returns.
pub(crate) struct ScopedTimer<'a> {
    start: Instant,
    service_name: &'a str,
    operation: &'a str,
}

impl<'a> ScopedTimer<'a> {
    pub(crate) fn new(
        service_name: &'a str,
        operation: &'a str,
    ) -> Self {
        Self {
            start: Instant::now(),
            service_name,
            operation,
        }
    }

    fn label(&self) -> String {
        format!("[{}] {}", self.service_name, self.operation)
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        trace!(
            target: "timing",
            "{} routed in {} us",
            self.label(),
            self.start.elapsed().as_micros()
        );
    }
}
