//! Outward event surface of a navigator session.
//!
//! The session defines *what* to report; the embedder injects *how* by
//! implementing [`SessionSink`]. A desktop frontend renders notices as
//! toast notifications and the lock flag as a blocking overlay.

/// A user-visible report about a failed remote interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A gated operation failed. Rendered as a dismissible error naming
    /// the action the user attempted.
    OperationFailed {
        action: &'static str,
        message: String,
    },
    /// A listing refresh failed. Rendered as a passive indicator; the
    /// listing keeps its previous contents.
    RefreshFailed { message: String },
}

/// Event consumer injected by the session's owner.
///
/// Implementations must be `Send + 'static` so sessions can be driven
/// from spawned tasks. All methods take `&self` and are expected to be
/// cheap (channel send, state flip).
pub trait SessionSink: Send + 'static {
    /// Deliver a failure notice for display.
    fn notice(&self, notice: Notice);

    /// The gate's busy flag changed; while `true` the frontend must
    /// block pointer and keyboard input to the listing view.
    fn lock_changed(&self, locked: bool);

    /// The session is over. Fired exactly once per disconnect action,
    /// whatever the backend reported.
    fn session_ended(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records all sink calls for assertion.
    struct RecordingSink {
        notices: Arc<Mutex<Vec<Notice>>>,
        locks: Arc<Mutex<Vec<bool>>>,
        ended: Arc<Mutex<usize>>,
    }

    impl SessionSink for RecordingSink {
        fn notice(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }

        fn lock_changed(&self, locked: bool) {
            self.locks.lock().unwrap().push(locked);
        }

        fn session_ended(&self) {
            *self.ended.lock().unwrap() += 1;
        }
    }

    #[test]
    fn sink_is_object_safe() {
        let notices = Arc::new(Mutex::new(Vec::new()));
        let sink: Box<dyn SessionSink> = Box::new(RecordingSink {
            notices: notices.clone(),
            locks: Arc::new(Mutex::new(Vec::new())),
            ended: Arc::new(Mutex::new(0)),
        });

        sink.notice(Notice::RefreshFailed {
            message: "offline".to_string(),
        });
        assert_eq!(notices.lock().unwrap().len(), 1);
    }

    #[test]
    fn notices_compare_by_content() {
        let a = Notice::OperationFailed {
            action: "delete",
            message: "denied".to_string(),
        };
        let b = Notice::OperationFailed {
            action: "delete",
            message: "denied".to_string(),
        };
        assert_eq!(a, b);
    }
}
