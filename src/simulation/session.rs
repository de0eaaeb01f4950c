//! Per-session iteration counters for the simulated ReAct executor.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;

/// What the executor should do on this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorTurn {
    /// Odd iteration: request a tool.
    UseTool { iteration: u32 },
    /// Even iteration: answer. The session entry has been removed.
    Answer { iteration: u32 },
}

impl ExecutorTurn {
    /// Iteration number this turn was derived from.
    pub fn iteration(&self) -> u32 {
        match self {
            ExecutorTurn::UseTool { iteration } | ExecutorTurn::Answer { iteration } => *iteration,
        }
    }
}

/// In-memory map of session id to executor call count.
///
/// Entries are created on the first executor call for a session and removed
/// once that session receives its final answer. Sessions abandoned mid-cycle
/// stay until the process exits.
#[derive(Debug, Default)]
pub struct SessionTracker {
    iterations: Mutex<HashMap<String, u32>>,
}

impl SessionTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the counter for `session_id` (starting from 0) and return the new value.
    pub async fn increment(&self, session_id: &str) -> u32 {
        let mut iterations = self.iterations.lock().await;
        bump(&mut iterations, session_id)
    }

    /// Forget `session_id` so its next call starts a fresh cycle.
    pub async fn clear(&self, session_id: &str) {
        self.iterations.lock().await.remove(session_id);
    }

    /// Increment and, on an even iteration, clear, under one lock.
    ///
    /// Two concurrent calls for the same session therefore always observe
    /// consecutive iterations.
    pub async fn advance(&self, session_id: &str) -> ExecutorTurn {
        let mut iterations = self.iterations.lock().await;
        let iteration = bump(&mut iterations, session_id);

        if iteration % 2 == 1 {
            ExecutorTurn::UseTool { iteration }
        } else {
            iterations.remove(session_id);
            debug!(session_id = %session_id, iteration, "Executor cycle complete, session cleared");
            ExecutorTurn::Answer { iteration }
        }
    }

    /// Current counter for `session_id`, if a cycle is in progress.
    pub async fn get(&self, session_id: &str) -> Option<u32> {
        self.iterations.lock().await.get(session_id).copied()
    }

    /// Number of sessions with a cycle in progress.
    pub async fn len(&self) -> usize {
        self.iterations.lock().await.len()
    }

    /// Whether no cycle is in progress.
    pub async fn is_empty(&self) -> bool {
        self.iterations.lock().await.is_empty()
    }
}

fn bump(iterations: &mut HashMap<String, u32>, session_id: &str) -> u32 {
    let count = iterations.entry(session_id.to_string()).or_insert(0);
    *count += 1;
    *count
}
