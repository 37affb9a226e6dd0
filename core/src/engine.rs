//! Engine facade: owns one loaded graph and answers queries against it.
//!
//! Queries never fail. An out-of-range node id yields `-1`, an empty
//! sequence, or `(-1, 0)`, and an `InvalidNode` event is reported.
//! A load either replaces the whole graph or leaves it untouched.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::csr::{CsrGraph, NodeId};
use crate::diagnostics::DebugDump;
use crate::error::LoadError;
use crate::observe::{EngineEvent, EngineObserver, Operation, TracingObserver};
use crate::parse::{self, EdgeList};
use crate::traversal::{self, DegreeResult, SubgraphEdge, Visit};

/// Source label used for graphs loaded from memory.
pub const MEMORY_SOURCE: &str = "<memory>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Reject loads whose CSR arrays would exceed this many MiB.
    pub max_memory_mb: Option<usize>,
}

impl EngineConfig {
    fn limit_bytes(&self) -> Option<usize> {
        self.max_memory_mb.map(|mb| mb.saturating_mul(1024 * 1024))
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub skipped_lines: usize,
    pub memory_bytes: usize,
    pub load_time: Duration,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineStatus {
    pub loaded: bool,
    pub source: Option<String>,
    pub node_count: usize,
    pub edge_count: usize,
    pub memory_bytes: usize,
    pub skipped_lines: usize,
    pub load_time: Option<Duration>,
    /// Time since the current graph was installed.
    pub age: Option<Duration>,
    /// Incremented on every successful load. 0 = nothing loaded yet.
    pub generation: u64,
}

/// Metadata about the currently loaded graph.
struct LoadedState {
    source: String,
    load_time: Duration,
    loaded_at: Instant,
    skipped_lines: usize,
}

pub struct Engine<O = TracingObserver> {
    graph: CsrGraph,
    config: EngineConfig,
    observer: O,
    loaded: Option<LoadedState>,
    generation: u64,
}

impl Engine<TracingObserver> {
    pub fn new() -> Self {
        Self::with_observer(EngineConfig::default(), TracingObserver)
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_observer(config, TracingObserver)
    }
}

impl Default for Engine<TracingObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: EngineObserver> Engine<O> {
    pub fn with_observer(config: EngineConfig, observer: O) -> Self {
        Self {
            graph: CsrGraph::new(),
            config,
            observer,
            loaded: None,
            generation: 0,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn graph(&self) -> &CsrGraph {
        &self.graph
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Load an edge-list file, replacing the current graph on success.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary, LoadError> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let start = Instant::now();
        self.observer.on_event(&EngineEvent::LoadStarted {
            source: source.clone(),
        });

        match parse::read_edge_list(path) {
            Ok(list) => self.install(&list, source, start),
            Err(e) => {
                self.observer.on_event(&EngineEvent::LoadFailed {
                    source,
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Load an already-parsed edge list.
    pub fn load_edge_list(&mut self, list: &EdgeList) -> Result<LoadSummary, LoadError> {
        let start = Instant::now();
        self.observer.on_event(&EngineEvent::LoadStarted {
            source: MEMORY_SOURCE.to_string(),
        });
        self.install(list, MEMORY_SOURCE.to_string(), start)
    }

    fn install(
        &mut self,
        list: &EdgeList,
        source: String,
        start: Instant,
    ) -> Result<LoadSummary, LoadError> {
        if let Some(limit_bytes) = self.config.limit_bytes() {
            let required_bytes = CsrGraph::estimated_bytes(list.max_node, list.len());
            if required_bytes > limit_bytes {
                let err = LoadError::MemoryLimitExceeded {
                    required_bytes,
                    limit_bytes,
                };
                self.observer.on_event(&EngineEvent::LoadFailed {
                    source,
                    reason: err.to_string(),
                });
                return Err(err);
            }
        }

        let graph = CsrGraph::from_edge_list(list);
        let memory_bytes = graph.memory_usage();

        let load_time = start.elapsed();
        self.graph = graph;
        self.generation += 1;
        self.loaded = Some(LoadedState {
            source: source.clone(),
            load_time,
            loaded_at: Instant::now(),
            skipped_lines: list.skipped_lines,
        });

        let summary = LoadSummary {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            skipped_lines: list.skipped_lines,
            memory_bytes,
            load_time,
            generation: self.generation,
        };
        self.observer.on_event(&EngineEvent::Loaded {
            source,
            node_count: summary.node_count,
            edge_count: summary.edge_count,
            skipped_lines: summary.skipped_lines,
            memory_bytes,
            elapsed: load_time,
        });
        Ok(summary)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Map an external id onto the graph, reporting rejects.
    fn resolve(&self, operation: Operation, node: i64) -> Option<NodeId> {
        let resolved = NodeId::try_from(node)
            .ok()
            .filter(|&id| self.graph.contains(id));
        if resolved.is_none() {
            self.observer
                .on_event(&EngineEvent::InvalidNode { operation, node });
        }
        resolved
    }

    fn finished(&self, operation: Operation, start: i64, nodes: usize, edges: usize, t: Instant) {
        self.observer.on_event(&EngineEvent::TraversalFinished {
            operation,
            start,
            nodes,
            edges,
            elapsed: t.elapsed(),
        });
    }

    /// Nodes within `max_depth` hops of `start`, in BFS order.
    pub fn bfs(&self, start: i64, max_depth: u32) -> Vec<Visit> {
        let Some(id) = self.resolve(Operation::Bfs, start) else {
            return Vec::new();
        };
        let t = Instant::now();
        let result = traversal::bfs_neighborhood(&self.graph, id, max_depth);
        self.finished(Operation::Bfs, start, result.nodes_visited, 0, t);
        result.visits
    }

    /// Every node reachable from `start`, in DFS preorder.
    pub fn dfs(&self, start: i64) -> Vec<NodeId> {
        let Some(id) = self.resolve(Operation::Dfs, start) else {
            return Vec::new();
        };
        let t = Instant::now();
        let order = traversal::dfs_preorder(&self.graph, id);
        self.finished(Operation::Dfs, start, order.len(), 0, t);
        order
    }

    /// Edges leaving nodes discovered within the depth bound, non-tree edges included.
    pub fn subgraph_edges(&self, start: i64, max_depth: u32) -> Vec<SubgraphEdge> {
        let Some(id) = self.resolve(Operation::Subgraph, start) else {
            return Vec::new();
        };
        let t = Instant::now();
        let sub = traversal::extract_subgraph(&self.graph, id, max_depth);
        self.finished(Operation::Subgraph, start, sub.node_count, sub.edges.len(), t);
        sub.edges
    }

    /// Out-degree, or -1 for an invalid node.
    pub fn out_degree(&self, node: i64) -> i64 {
        self.resolve(Operation::OutDegree, node)
            .and_then(|id| self.graph.out_degree(id))
            .map_or(-1, i64::from)
    }

    /// In-degree, or -1 for an invalid node.
    pub fn in_degree(&self, node: i64) -> i64 {
        self.resolve(Operation::InDegree, node)
            .and_then(|id| self.graph.in_degree(id))
            .map_or(-1, i64::from)
    }

    /// Copy of the node's ascending neighbor row.
    pub fn neighbors(&self, node: i64) -> Vec<NodeId> {
        self.resolve(Operation::Neighbors, node)
            .map(|id| self.graph.neighbors(id).to_vec())
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// `(node, out_degree)` of the first node with the highest out-degree,
    /// or `(-1, 0)` when no node has an outgoing edge.
    pub fn highest_out_degree_node(&self) -> (i64, u32) {
        let (node, degree) = traversal::highest_out_degree(&self.graph)
            .map_or((-1, 0), |d| (i64::from(d.node_id), d.out_degree));
        self.observer
            .on_event(&EngineEvent::HighestDegree { node, degree });
        (node, degree)
    }

    pub fn degree_ranking(&self, top_n: usize) -> Vec<DegreeResult> {
        traversal::degree_ranking(&self.graph, top_n)
    }

    /// Capacity-based size of the CSR arrays in bytes.
    pub fn memory_estimate(&self) -> usize {
        self.graph.memory_usage()
    }

    pub fn status(&self) -> EngineStatus {
        let loaded = self.loaded.as_ref();
        EngineStatus {
            loaded: loaded.is_some(),
            source: loaded.map(|s| s.source.clone()),
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            memory_bytes: self.graph.memory_usage(),
            skipped_lines: loaded.map_or(0, |s| s.skipped_lines),
            load_time: loaded.map(|s| s.load_time),
            age: loaded.map(|s| s.loaded_at.elapsed()),
            generation: self.generation,
        }
    }

    pub fn debug_dump(&self, rows: usize, cols: usize) -> DebugDump {
        DebugDump::capture(&self.graph, rows, cols)
    }
}
