//! Operation Outcome Log
//!
//! The grading channel: every client-visible result flows through here, both
//! the per-replica server results and the final coordinator verdicts reached
//! by quorum or timeout. Diagnostic logging stays on `tracing`; this sink
//! exists so a harness can assert on exactly what the cluster decided.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

use crate::membership::types::NodeAddr;

/// The four client operation kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OpKind {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpKind::Create => "CREATE",
            OpKind::Read => "READ",
            OpKind::Update => "UPDATE",
            OpKind::Delete => "DELETE",
        };
        write!(f, "{}", name)
    }
}

/// One recorded outcome.
///
/// `coordinator` distinguishes the final verdict a coordinator reached for a
/// transaction from the per-operation result an individual replica reported.
/// Outcomes with no intrinsic value (read failures, deletes) carry `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpEvent {
    pub node: NodeAddr,
    pub coordinator: bool,
    pub kind: OpKind,
    pub success: bool,
    pub txn: i64,
    pub key: String,
    pub value: Option<String>,
}

/// Destination for operation outcomes.
pub trait OutcomeSink: Send + Sync {
    fn record(&self, event: OpEvent);
}

/// Sink that keeps every event in memory, for harness summaries and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<OpEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in arrival order.
    pub fn events(&self) -> Vec<OpEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Final coordinator verdicts only.
    pub fn coordinator_events(&self) -> Vec<OpEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.coordinator)
            .cloned()
            .collect()
    }

    /// How many outcomes of the given shape have been recorded.
    pub fn count(&self, kind: OpKind, success: bool, coordinator: bool) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| {
                event.kind == kind && event.success == success && event.coordinator == coordinator
            })
            .count()
    }
}

impl OutcomeSink for MemorySink {
    fn record(&self, event: OpEvent) {
        self.events.lock().unwrap().push(event);
    }
}
