use std::collections::{HashSet, VecDeque};

use crate::csr::{CsrGraph, NodeId};

/// A node reached by BFS, with its hop distance from the start node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub node_id: NodeId,
    pub distance: u32,
}

/// Result of a BFS traversal.
#[derive(Debug, Default)]
pub struct TraversalResult {
    /// Nodes in dequeue order, start node first at distance 0.
    pub visits: Vec<Visit>,
    pub nodes_visited: usize,
}

/// A directed edge recorded during subgraph extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubgraphEdge {
    pub from_id: NodeId,
    pub to_id: NodeId,
}

/// Result of subgraph extraction.
#[derive(Debug, Default)]
pub struct SubgraphResult {
    /// Distinct nodes discovered, start included.
    pub node_count: usize,
    pub edges: Vec<SubgraphEdge>,
}

/// Degree information for a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeResult {
    pub node_id: NodeId,
    pub out_degree: u32,
    pub in_degree: u32,
}

impl DegreeResult {
    pub fn total_degree(&self) -> u32 {
        self.out_degree + self.in_degree
    }
}

/// BFS neighborhood: every node reachable from `start` within `max_depth`
/// hops, each reported once at its shortest hop distance.
///
/// Nodes are marked visited when enqueued, so the queue holds each node at
/// most once. Nodes at exactly `max_depth` are reported but not expanded.
pub fn bfs_neighborhood(graph: &CsrGraph, start: NodeId, max_depth: u32) -> TraversalResult {
    if !graph.contains(start) {
        return TraversalResult::default();
    }

    let mut visited = vec![false; graph.node_count()];
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();
    let mut visits = Vec::new();

    visited[start as usize] = true;
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        visits.push(Visit {
            node_id: current,
            distance: depth,
        });

        if depth >= max_depth {
            continue;
        }

        for &next in graph.neighbors(current) {
            if !visited[next as usize] {
                visited[next as usize] = true;
                queue.push_back((next, depth + 1));
            }
        }
    }

    let nodes_visited = visits.len();
    TraversalResult {
        visits,
        nodes_visited,
    }
}

/// Iterative DFS preorder from `start`, no depth bound.
///
/// The visited check happens on pop, so a node may sit on the stack more
/// than once. Neighbors are pushed in reverse so siblings pop ascending,
/// matching recursive preorder.
pub fn dfs_preorder(graph: &CsrGraph, start: NodeId) -> Vec<NodeId> {
    if !graph.contains(start) {
        return Vec::new();
    }

    let mut visited = vec![false; graph.node_count()];
    let mut stack: Vec<NodeId> = vec![start];
    let mut order = Vec::new();

    while let Some(current) = stack.pop() {
        if visited[current as usize] {
            continue;
        }
        visited[current as usize] = true;
        order.push(current);

        for &next in graph.neighbors(current).iter().rev() {
            if !visited[next as usize] {
                stack.push(next);
            }
        }
    }

    order
}

/// Extract every edge leaving a node discovered within `max_depth - 1` hops
/// of `start`.
///
/// All outgoing edges of an expanded node are recorded, including edges back
/// to nodes already discovered, so the result is not limited to a BFS tree.
/// A target is expanded only the first time it is discovered.
pub fn extract_subgraph(graph: &CsrGraph, start: NodeId, max_depth: u32) -> SubgraphResult {
    if !graph.contains(start) {
        return SubgraphResult::default();
    }

    let mut discovered: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<(NodeId, u32)> = VecDeque::new();
    let mut edges = Vec::new();

    discovered.insert(start);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for &next in graph.neighbors(current) {
            edges.push(SubgraphEdge {
                from_id: current,
                to_id: next,
            });
            if discovered.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    SubgraphResult {
        node_count: discovered.len(),
        edges,
    }
}

fn degree_of(graph: &CsrGraph, node: NodeId) -> DegreeResult {
    DegreeResult {
        node_id: node,
        out_degree: graph.out_degree(node).unwrap_or(0),
        in_degree: graph.in_degree(node).unwrap_or(0),
    }
}

/// Node with the strictly highest out-degree; the lowest id wins ties.
/// None when the graph has no node with out-degree above zero.
pub fn highest_out_degree(graph: &CsrGraph) -> Option<DegreeResult> {
    let mut best: Option<(NodeId, u32)> = None;
    let mut max_degree = 0;

    for index in 0..graph.node_count() {
        let node = index as NodeId;
        let degree = graph.out_degree(node).unwrap_or(0);
        if degree > max_degree {
            max_degree = degree;
            best = Some((node, degree));
        }
    }

    best.map(|(node, _)| degree_of(graph, node))
}

/// Nodes ranked by total degree (out + in) descending, then id ascending.
/// `top_n = 0` returns every node.
pub fn degree_ranking(graph: &CsrGraph, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = (0..graph.node_count())
        .map(|index| degree_of(graph, index as NodeId))
        .collect();

    results.sort_by(|a, b| {
        b.total_degree()
            .cmp(&a.total_degree())
            .then(a.node_id.cmp(&b.node_id))
    });

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_chain(n: u32) -> CsrGraph {
        let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        CsrGraph::build(&edges, Some(n - 1))
    }

    fn make_star(center: u32, leaves: u32) -> CsrGraph {
        let edges: Vec<_> = (1..=leaves).map(|i| (center, i)).collect();
        CsrGraph::build(&edges, None)
    }

    fn make_cycle(n: u32) -> CsrGraph {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        CsrGraph::build(&edges, Some(n - 1))
    }

    fn sample() -> CsrGraph {
        CsrGraph::build(&[(0, 1), (0, 2), (1, 2), (2, 0)], Some(2))
    }

    fn pairs(result: &TraversalResult) -> Vec<(NodeId, u32)> {
        result.visits.iter().map(|v| (v.node_id, v.distance)).collect()
    }

    // --- BFS tests ---

    #[test]
    fn test_bfs_sample() {
        let result = bfs_neighborhood(&sample(), 0, 1);
        assert_eq!(pairs(&result), vec![(0, 0), (1, 1), (2, 1)]);
        assert_eq!(result.nodes_visited, 3);
    }

    #[test]
    fn test_bfs_chain() {
        let g = make_chain(6);
        let result = bfs_neighborhood(&g, 0, 10);
        assert_eq!(result.nodes_visited, 6);
        let node5 = result.visits.iter().find(|v| v.node_id == 5).unwrap();
        assert_eq!(node5.distance, 5);
    }

    #[test]
    fn test_bfs_chain_depth_limited() {
        let g = make_chain(10);
        let result = bfs_neighborhood(&g, 0, 3);
        assert_eq!(pairs(&result), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_bfs_directed_only() {
        // Edges are followed forward only.
        let g = make_chain(3);
        let result = bfs_neighborhood(&g, 2, 5);
        assert_eq!(pairs(&result), vec![(2, 0)]);
    }

    #[test]
    fn test_bfs_star() {
        let g = make_star(0, 100);
        let result = bfs_neighborhood(&g, 0, 1);
        assert_eq!(result.nodes_visited, 101);
        assert!(result.visits[1..].iter().all(|v| v.distance == 1));
    }

    #[test]
    fn test_bfs_cycle_no_infinite_loop() {
        let g = make_cycle(5);
        let result = bfs_neighborhood(&g, 0, 100);
        assert_eq!(result.nodes_visited, 5);
    }

    #[test]
    fn test_bfs_empty_graph() {
        let result = bfs_neighborhood(&CsrGraph::new(), 0, 10);
        assert!(result.visits.is_empty());
        assert_eq!(result.nodes_visited, 0);
    }

    #[test]
    fn test_bfs_start_not_in_graph() {
        let result = bfs_neighborhood(&make_chain(3), 999, 10);
        assert!(result.visits.is_empty());
    }

    #[test]
    fn test_bfs_depth_zero() {
        let result = bfs_neighborhood(&make_chain(5), 0, 0);
        assert_eq!(pairs(&result), vec![(0, 0)]);
    }

    #[test]
    fn test_bfs_self_loop() {
        let g = CsrGraph::build(&[(0, 0)], None);
        let result = bfs_neighborhood(&g, 0, 5);
        assert_eq!(pairs(&result), vec![(0, 0)]);
    }

    #[test]
    fn test_bfs_parallel_edges() {
        let g = CsrGraph::build(&[(0, 1), (0, 1), (0, 1)], None);
        let result = bfs_neighborhood(&g, 0, 1);
        assert_eq!(pairs(&result), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_bfs_shortest_distance_wins() {
        // 0 -> 1 -> 2 -> 3 and shortcut 0 -> 3
        let g = CsrGraph::build(&[(0, 1), (1, 2), (2, 3), (0, 3)], None);
        let result = bfs_neighborhood(&g, 0, 10);
        assert_eq!(pairs(&result), vec![(0, 0), (1, 1), (3, 1), (2, 2)]);
    }

    #[test]
    fn test_bfs_enqueue_order_not_numeric() {
        // 5 (child of 1) comes out before 3 (child of 2)
        let g = CsrGraph::build(&[(0, 1), (0, 2), (2, 3), (1, 5)], None);
        let order: Vec<_> = bfs_neighborhood(&g, 0, 5)
            .visits
            .iter()
            .map(|v| v.node_id)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 5, 3]);
    }

    // --- DFS tests ---

    #[test]
    fn test_dfs_sample() {
        assert_eq!(dfs_preorder(&sample(), 0), vec![0, 1, 2]);
    }

    #[test]
    fn test_dfs_matches_recursive_preorder() {
        //     0
        //   /   \
        //  1     4
        //  |\
        //  2 3
        let g = CsrGraph::build(&[(0, 4), (0, 1), (1, 3), (1, 2)], None);
        assert_eq!(dfs_preorder(&g, 0), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_dfs_revisited_on_stack() {
        // 2 is pushed from 0, then reached first via 1.
        let g = CsrGraph::build(&[(0, 1), (0, 2), (1, 2), (2, 3)], None);
        assert_eq!(dfs_preorder(&g, 0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_dfs_no_depth_limit() {
        let g = make_chain(2000);
        let order = dfs_preorder(&g, 0);
        assert_eq!(order.len(), 2000);
        assert_eq!(order[1999], 1999);
    }

    #[test]
    fn test_dfs_cycle() {
        assert_eq!(dfs_preorder(&make_cycle(4), 2), vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_dfs_invalid_start() {
        assert!(dfs_preorder(&sample(), 3).is_empty());
        assert!(dfs_preorder(&CsrGraph::new(), 0).is_empty());
    }

    #[test]
    fn test_dfs_isolated_node() {
        let g = CsrGraph::build(&[(0, 1)], Some(3));
        assert_eq!(dfs_preorder(&g, 3), vec![3]);
    }

    // --- Subgraph tests ---

    #[test]
    fn test_subgraph_includes_non_tree_edges() {
        let sub = extract_subgraph(&sample(), 0, 2);
        let edges: Vec<_> = sub.edges.iter().map(|e| (e.from_id, e.to_id)).collect();
        // 1 -> 2 and 2 -> 0 point at already-discovered nodes but are kept
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 2), (2, 0)]);
        assert_eq!(sub.node_count, 3);
    }

    #[test]
    fn test_subgraph_depth_one() {
        let sub = extract_subgraph(&sample(), 0, 1);
        let edges: Vec<_> = sub.edges.iter().map(|e| (e.from_id, e.to_id)).collect();
        assert_eq!(edges, vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_subgraph_depth_zero() {
        let sub = extract_subgraph(&sample(), 0, 0);
        assert!(sub.edges.is_empty());
        assert_eq!(sub.node_count, 1);
    }

    #[test]
    fn test_subgraph_chain() {
        let sub = extract_subgraph(&make_chain(10), 0, 3);
        assert_eq!(sub.edges.len(), 3);
        assert_eq!(sub.node_count, 4);
    }

    #[test]
    fn test_subgraph_duplicate_edges() {
        let g = CsrGraph::build(&[(0, 1), (0, 1)], None);
        let sub = extract_subgraph(&g, 0, 5);
        assert_eq!(sub.edges.len(), 2);
        assert_eq!(sub.node_count, 2);
    }

    #[test]
    fn test_subgraph_invalid_start() {
        let sub = extract_subgraph(&sample(), 42, 3);
        assert!(sub.edges.is_empty());
        assert_eq!(sub.node_count, 0);
    }

    // --- Degree tests ---

    #[test]
    fn test_highest_out_degree_sample() {
        let best = highest_out_degree(&sample()).unwrap();
        assert_eq!(best.node_id, 0);
        assert_eq!(best.out_degree, 2);
        assert_eq!(best.in_degree, 1);
    }

    #[test]
    fn test_highest_out_degree_tie_lowest_id() {
        let g = CsrGraph::build(&[(3, 0), (3, 1), (1, 0), (1, 2)], None);
        assert_eq!(highest_out_degree(&g).unwrap().node_id, 1);
    }

    #[test]
    fn test_highest_out_degree_no_edges() {
        assert!(highest_out_degree(&CsrGraph::build(&[], Some(5))).is_none());
        assert!(highest_out_degree(&CsrGraph::new()).is_none());
    }

    #[test]
    fn test_degree_ranking_star() {
        let g = make_star(0, 5);
        let ranked = degree_ranking(&g, 0);
        assert_eq!(ranked.len(), 6);
        assert_eq!(ranked[0].node_id, 0);
        assert_eq!(ranked[0].out_degree, 5);
        assert_eq!(ranked[0].total_degree(), 5);
        // Leaves tie at 1, ordered by id
        let leaves: Vec<_> = ranked[1..].iter().map(|d| d.node_id).collect();
        assert_eq!(leaves, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_degree_ranking_top_n() {
        let g = make_chain(5);
        let ranked = degree_ranking(&g, 2);
        assert_eq!(ranked.len(), 2);
        // Interior nodes have total degree 2
        assert_eq!(ranked[0].node_id, 1);
        assert_eq!(ranked[1].node_id, 2);
    }

    #[test]
    fn test_degree_ranking_empty() {
        assert!(degree_ranking(&CsrGraph::new(), 10).is_empty());
    }

    #[test]
    fn test_degree_scans_reach_last_node() {
        // Hub is the highest id, so every index up to node_count must be scanned
        let g = CsrGraph::build(&[(9, 0), (9, 1), (9, 2), (0, 1)], None);
        let top = highest_out_degree(&g).unwrap();
        assert_eq!(top.node_id, 9);
        assert_eq!(top.out_degree, 3);

        let ranked = degree_ranking(&g, 0);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].node_id, 9);
        assert_eq!(ranked.last().unwrap().node_id, 8);
    }
}
