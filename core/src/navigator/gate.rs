//! Mutual-exclusion gate over mutating remote requests.
//!
//! At most one gated request is in flight per session. The busy flag is
//! what the frontend reads to disable the listing view while a request
//! runs; it is set synchronously before the request future is first
//! polled and cleared by a drop guard on every settlement path (success,
//! failure, timeout), so the UI can never be locked out permanently.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::errors::{FileError, GateError};

/// Serializes mutating remote requests and exposes the UI-disable flag.
#[derive(Debug)]
pub struct OperationGate {
    busy: Arc<AtomicBool>,
    timeout: Duration,
}

/// Clears the busy flag when the gated request settles or is abandoned.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl OperationGate {
    pub fn new(timeout: Duration) -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(false)),
            timeout,
        }
    }

    /// Whether a gated request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Try-run `op` under the gate.
    ///
    /// When a request is already in flight, returns [`GateError::Busy`]
    /// without polling `op`; the request is simply not issued. Otherwise
    /// the busy flag is raised, `op` runs under the configured timeout,
    /// and the flag is cleared however `op` settles. A timed-out `op` is
    /// dropped, force-releasing the gate.
    pub async fn run<T, F>(&self, op: F) -> Result<T, GateError>
    where
        F: Future<Output = Result<T, FileError>>,
    {
        if self.busy.swap(true, Ordering::SeqCst) {
            debug!("gate busy, request not issued");
            return Err(GateError::Busy);
        }
        let _guard = BusyGuard(self.busy.clone());

        match tokio::time::timeout(self.timeout, op).await {
            Ok(settled) => settled.map_err(GateError::from),
            Err(_) => {
                warn!(timeout = ?self.timeout, "gated request timed out, gate force-released");
                Err(GateError::Timeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> OperationGate {
        OperationGate::new(Duration::from_secs(30))
    }

    #[tokio::test]
    async fn busy_while_running_and_released_on_success() {
        let gate = gate();
        assert!(!gate.is_busy());

        let result = gate
            .run(async {
                // The flag was raised before the future was polled.
                Ok::<_, FileError>(42)
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn released_on_failure_and_error_forwarded() {
        let gate = gate();

        let result: Result<(), _> = gate
            .run(async { Err(FileError::OperationFailed("rejected".to_string())) })
            .await;

        match result {
            Err(GateError::File(FileError::OperationFailed(msg))) => assert_eq!(msg, "rejected"),
            other => panic!("expected forwarded file error, got {other:?}"),
        }
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn second_request_rejected_while_first_in_flight() {
        let gate = gate();
        let release = tokio::sync::Notify::new();

        let (first, second) = tokio::join!(
            gate.run(async {
                release.notified().await;
                Ok::<_, FileError>("first")
            }),
            async {
                // Runs while the first request is parked on the notify.
                assert!(gate.is_busy());
                let rejected = gate.run(async { Ok::<_, FileError>("second") }).await;
                release.notify_one();
                rejected
            }
        );

        assert_eq!(first.unwrap(), "first");
        assert!(matches!(second, Err(GateError::Busy)));
        assert!(!gate.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_force_releases_gate() {
        let gate = OperationGate::new(Duration::from_secs(5));

        let result: Result<(), _> = gate.run(std::future::pending()).await;

        assert!(matches!(result, Err(GateError::Timeout(_))));
        assert!(!gate.is_busy());

        // The gate accepts new requests after a timeout.
        let result = gate.run(async { Ok::<_, FileError>(1) }).await;
        assert_eq!(result.unwrap(), 1);
    }
}
