/// Dense, zero-based node identifier. Every id in `0..node_count()` exists,
/// whether or not an edge references it.
pub type NodeId = u32;

/// Immutable directed graph in Compressed Sparse Row layout.
///
/// `column_indices[row_ptr[i]..row_ptr[i + 1]]` holds the destinations of
/// node `i`'s outgoing edges, sorted ascending. `values` runs parallel to
/// `column_indices` and is always 1. `in_degree` is precomputed on build.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    row_ptr: Vec<usize>,
    column_indices: Vec<NodeId>,
    values: Vec<u32>,
    in_degree: Vec<u32>,
}

impl CsrGraph {
    /// Empty graph: zero nodes, zero edges.
    pub fn new() -> Self {
        Self {
            row_ptr: vec![0],
            column_indices: Vec::new(),
            values: Vec::new(),
            in_degree: Vec::new(),
        }
    }

    /// Build from an edge sequence in O(E + N) time (counting sort by origin),
    /// then sort each row.
    ///
    /// `max_node = Some(m)` gives `m + 1` nodes even when `edges` is empty.
    /// `None` with no edges gives the empty graph. An edge endpoint above
    /// `max_node` widens the node range instead of being dropped.
    pub fn build(edges: &[(NodeId, NodeId)], max_node: Option<NodeId>) -> Self {
        let observed = edges.iter().map(|&(from, to)| from.max(to)).max();
        let max_node = match (max_node, observed) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let node_count = match max_node {
            Some(m) => m as usize + 1,
            None => return Self::new(),
        };
        let edge_count = edges.len();

        let mut row_ptr = vec![0usize; node_count + 1];
        let mut in_degree = vec![0u32; node_count];

        // Pass 1: tally out-degree into row_ptr[origin + 1], in-degree per destination
        for &(from, to) in edges {
            row_ptr[from as usize + 1] += 1;
            in_degree[to as usize] += 1;
        }

        for i in 1..=node_count {
            row_ptr[i] += row_ptr[i - 1];
        }

        // Pass 2: scatter destinations using per-row insertion cursors
        let mut column_indices = vec![0 as NodeId; edge_count];
        let values = vec![1u32; edge_count];
        let mut cursor = row_ptr[..node_count].to_vec();
        for &(from, to) in edges {
            let slot = &mut cursor[from as usize];
            column_indices[*slot] = to;
            *slot += 1;
        }

        for i in 0..node_count {
            column_indices[row_ptr[i]..row_ptr[i + 1]].sort_unstable();
        }

        Self {
            row_ptr,
            column_indices,
            values,
            in_degree,
        }
    }

    pub fn from_edge_list(list: &crate::parse::EdgeList) -> Self {
        Self::build(&list.edges, list.max_node)
    }

    pub fn node_count(&self) -> usize {
        self.in_degree.len()
    }

    pub fn edge_count(&self) -> usize {
        self.column_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    pub fn contains(&self, node: NodeId) -> bool {
        (node as usize) < self.node_count()
    }

    /// Destinations of `node`'s outgoing edges, ascending. Empty for an
    /// unknown node.
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        if !self.contains(node) {
            return &[];
        }
        let i = node as usize;
        &self.column_indices[self.row_ptr[i]..self.row_ptr[i + 1]]
    }

    pub fn out_degree(&self, node: NodeId) -> Option<u32> {
        if !self.contains(node) {
            return None;
        }
        let i = node as usize;
        Some((self.row_ptr[i + 1] - self.row_ptr[i]) as u32)
    }

    pub fn in_degree(&self, node: NodeId) -> Option<u32> {
        self.in_degree.get(node as usize).copied()
    }

    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    pub fn column_indices(&self) -> &[NodeId] {
        &self.column_indices
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn in_degrees(&self) -> &[u32] {
        &self.in_degree
    }

    /// Bytes reserved by the four arrays. Counts capacity, not length, so
    /// allocator slack is included.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        self.row_ptr.capacity() * size_of::<usize>()
            + self.column_indices.capacity() * size_of::<NodeId>()
            + self.values.capacity() * size_of::<u32>()
            + self.in_degree.capacity() * size_of::<u32>()
    }

    /// Bytes `build` will allocate for a graph with this maximum id and edge
    /// count, computed without allocating.
    pub fn estimated_bytes(max_node: Option<NodeId>, edge_count: usize) -> usize {
        use std::mem::size_of;

        let node_count = max_node.map_or(0, |m| m as usize + 1);
        (node_count + 1)
            .saturating_mul(size_of::<usize>())
            .saturating_add(edge_count.saturating_mul(size_of::<NodeId>() + size_of::<u32>()))
            .saturating_add(node_count.saturating_mul(size_of::<u32>()))
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::new()
    }
}
