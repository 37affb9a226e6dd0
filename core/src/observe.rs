//! Observability sink for engine operations.
//!
//! The engine never writes to stdout or stderr itself. Each load and query
//! reports an [`EngineEvent`] to the observer the engine was built with.
//! [`TracingObserver`] forwards to `tracing`; [`RecordingObserver`] keeps
//! events in memory so callers can assert on them.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

/// Operation names used in events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Bfs,
    Dfs,
    Subgraph,
    OutDegree,
    InDegree,
    Neighbors,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Bfs => "bfs",
            Operation::Dfs => "dfs",
            Operation::Subgraph => "subgraph",
            Operation::OutDegree => "out_degree",
            Operation::InDegree => "in_degree",
            Operation::Neighbors => "neighbors",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    LoadStarted {
        source: String,
    },
    Loaded {
        source: String,
        node_count: usize,
        edge_count: usize,
        skipped_lines: usize,
        memory_bytes: usize,
        elapsed: Duration,
    },
    /// Load aborted; the previously loaded graph is still in place.
    LoadFailed {
        source: String,
        reason: String,
    },
    TraversalFinished {
        operation: Operation,
        start: i64,
        nodes: usize,
        edges: usize,
        elapsed: Duration,
    },
    /// A query was given a node id outside `0..node_count`.
    InvalidNode {
        operation: Operation,
        node: i64,
    },
    HighestDegree {
        node: i64,
        degree: u32,
    },
}

pub trait EngineObserver {
    fn on_event(&self, event: &EngineEvent);
}

/// Default observer: forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl EngineObserver for TracingObserver {
    fn on_event(&self, event: &EngineEvent) {
        match event {
            EngineEvent::LoadStarted { source } => {
                tracing::info!(source = %source, "loading edge list");
            }
            EngineEvent::Loaded {
                source,
                node_count,
                edge_count,
                skipped_lines,
                memory_bytes,
                elapsed,
            } => {
                tracing::info!(
                    source = %source,
                    nodes = node_count,
                    edges = edge_count,
                    skipped_lines,
                    memory_mb = crate::diagnostics::bytes_to_mb(*memory_bytes),
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "CSR structure built"
                );
                if *skipped_lines > 0 {
                    tracing::debug!(skipped_lines, "malformed edge-list lines ignored");
                }
            }
            EngineEvent::LoadFailed { source, reason } => {
                tracing::warn!(source = %source, "load failed, keeping previous graph: {}", reason);
            }
            EngineEvent::TraversalFinished {
                operation,
                start,
                nodes,
                edges,
                elapsed,
            } => {
                tracing::debug!(
                    %operation,
                    start,
                    nodes,
                    edges,
                    elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                    "traversal finished"
                );
            }
            EngineEvent::InvalidNode { operation, node } => {
                tracing::warn!(%operation, node, "invalid node id");
            }
            EngineEvent::HighestDegree { node, degree } => {
                tracing::debug!(node, degree, "highest out-degree node");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl EngineObserver for NoopObserver {
    fn on_event(&self, _event: &EngineEvent) {}
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<EngineEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl EngineObserver for RecordingObserver {
    fn on_event(&self, event: &EngineEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

impl<T: EngineObserver + ?Sized> EngineObserver for &T {
    fn on_event(&self, event: &EngineEvent) {
        (**self).on_event(event)
    }
}

impl<T: EngineObserver + ?Sized> EngineObserver for std::sync::Arc<T> {
    fn on_event(&self, event: &EngineEvent) {
        (**self).on_event(event)
    }
}
