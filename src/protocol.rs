//! Channel protocol between the UI thread and the network backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::models::{Book, RobotStatus};
use crate::transcript::RequestId;

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone)]
pub enum BackendAction {
    /// Ask the assistant a question; `request` ties the resolution events
    /// back to the transcript placeholder.
    Chat { request: RequestId, question: String },
    /// Search the catalog by title or author
    Search { query: String },
    /// Start a shelf scan
    StartScan,
    /// Stop the running shelf scan
    StopScan,
    /// Poll the robot state
    FetchRobotStatus,
    /// Force the robot state (rearm after a completed scan)
    SetRobotStatus(RobotStatus),
    /// Ask the robot to guide the user to a book
    GuideToBook { barcode: String, title: String },
    /// Cancel an in-progress guidance run
    CancelGuide {
        barcode: String,
        request_id: Option<String>,
    },
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// The transport answered; the reveal is about to begin
    ReplyStarted { request: RequestId },
    /// One reveal prefix
    ReplyChunk { request: RequestId, text: String },
    /// Final reveal publish; `text` is the complete reply
    ReplyDone { request: RequestId, text: String },
    /// The transport failed; `question` is carried for retry
    ReplyFailed { request: RequestId, question: String },
    /// Search results arrived
    SearchResults(Vec<Book>),
    /// Search failed
    SearchFailed(String),
    /// A scan was started or stopped
    ScanStateChanged { scanning: bool },
    /// Robot state poll result
    RobotStatus(RobotStatus),
    /// Guidance request acknowledged
    GuideStarted { request_id: Option<String> },
    /// Guidance request failed
    GuideFailed(String),
    /// Guidance run cancelled
    GuideCancelled,
    /// Generic failure surfaced as a status toast
    Error(String),
}

/// Names the reply request whose reveal is allowed to tick.
///
/// The UI arms the gate when it issues a request and clears it on view
/// teardown; the backend samples it between ticks and stops as soon as it
/// no longer names its request. This is the cancellation handle that ties
/// the reveal task to the lifetime of its target message.
#[derive(Clone, Default)]
pub struct RevealGate(Arc<AtomicU64>);

impl RevealGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&self, request: RequestId) {
        self.0.store(request, Ordering::SeqCst);
    }

    /// Invalidate whatever request is ticking. Id 0 is never handed out.
    pub fn clear(&self) {
        self.0.store(0, Ordering::SeqCst);
    }

    pub fn is_current(&self, request: RequestId) -> bool {
        self.0.load(Ordering::SeqCst) == request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_arm_and_supersede() {
        let gate = RevealGate::new();
        assert!(!gate.is_current(1));

        gate.arm(1);
        assert!(gate.is_current(1));

        gate.arm(2);
        assert!(!gate.is_current(1));
        assert!(gate.is_current(2));

        gate.clear();
        assert!(!gate.is_current(2));
    }
}
