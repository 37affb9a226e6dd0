use std::fmt;

use crate::csr::{CsrGraph, NodeId};

pub const DEFAULT_DUMP_ROWS: usize = 10;
pub const DEFAULT_DUMP_COLS: usize = 20;

pub fn bytes_to_mb(bytes: usize) -> f64 {
    bytes as f64 / 1_048_576.0
}

/// Truncated snapshot of the CSR arrays. Observational only.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugDump {
    pub node_count: usize,
    pub edge_count: usize,
    pub memory_bytes: usize,
    /// First entries of `row_ptr`.
    pub row_ptr: Vec<usize>,
    /// First entries of `column_indices`.
    pub column_indices: Vec<NodeId>,
}

impl DebugDump {
    pub fn capture(graph: &CsrGraph, rows: usize, cols: usize) -> Self {
        let row_ptr = graph.row_ptr();
        let column_indices = graph.column_indices();
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            memory_bytes: graph.memory_usage(),
            row_ptr: row_ptr[..rows.min(row_ptr.len())].to_vec(),
            column_indices: column_indices[..cols.min(column_indices.len())].to_vec(),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for DebugDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== CSR debug ===")?;
        writeln!(f, "nodes:  {}", self.node_count)?;
        writeln!(f, "edges:  {}", self.edge_count)?;
        writeln!(f, "memory: {:.2} MB", bytes_to_mb(self.memory_bytes))?;
        write!(f, "row_ptr (first {}): ", self.row_ptr.len())?;
        write_list(f, &self.row_ptr)?;
        writeln!(f)?;
        write!(f, "column_indices (first {}): ", self.column_indices.len())?;
        write_list(f, &self.column_indices)?;
        writeln!(f)
    }
}
