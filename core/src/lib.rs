//! neuronet-core: Compressed-sparse-row graph engine.
//!
//! Loads a directed edge list once into immutable CSR arrays and answers
//! read-only connectivity queries against them: depth-bounded BFS, DFS,
//! degree lookups, neighbor rows, subgraph edge extraction and memory
//! accounting. No front-end dependencies; this crate compiles standalone.

mod csr;
mod diagnostics;
mod engine;
mod error;
mod observe;
mod parse;
mod traversal;

pub use csr::{CsrGraph, NodeId};
pub use diagnostics::{bytes_to_mb, DebugDump, DEFAULT_DUMP_COLS, DEFAULT_DUMP_ROWS};
pub use engine::{Engine, EngineConfig, EngineStatus, LoadSummary, MEMORY_SOURCE};
pub use error::LoadError;
pub use observe::{
    EngineEvent, EngineObserver, NoopObserver, Operation, RecordingObserver, TracingObserver,
};
pub use parse::{parse_edge_list, read_edge_list, EdgeList};
pub use traversal::{
    bfs_neighborhood, degree_ranking, dfs_preorder, extract_subgraph, highest_out_degree,
    DegreeResult, SubgraphEdge, SubgraphResult, TraversalResult, Visit,
};
