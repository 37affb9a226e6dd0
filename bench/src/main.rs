use neuronet_core::{bytes_to_mb, CsrGraph, EdgeList, NodeId};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: neuronet-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters joined by a thin bridge");
        println!();
        println!("Default node_count: 5000000");
        return;
    }

    if node_count < 32 {
        eprintln!("node_count must be at least 32");
        return;
    }

    println!("neuronet-bench");
    println!("==============");
    println!();

    let generators: Vec<(&str, fn(u32) -> EdgeList)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u32) -> EdgeList),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: fn(u32) -> EdgeList, node_count: u32) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    println!("Generated {} edges in {:.1}ms", edges.len(), ms(t));

    let t = Instant::now();
    let graph = CsrGraph::from_edge_list(&edges);
    println!(
        "CSR built in {:.1}ms: {} nodes, {} edges, ~{:.1}MB",
        ms(t),
        graph.node_count(),
        graph.edge_count(),
        bytes_to_mb(graph.memory_usage())
    );
    drop(edges);

    // BFS from node 0 (root or hub for every generator)
    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "visited", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = neuronet_core::bfs_neighborhood(&graph, 0, depth);
        println!("{:>8} {:>12} {:>8.1}ms", depth, result.nodes_visited, ms(t));
        if result.nodes_visited >= graph.node_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    println!();
    let t = Instant::now();
    let order = neuronet_core::dfs_preorder(&graph, 0);
    println!("DFS from 0: {} nodes in {:.1}ms", order.len(), ms(t));

    let t = Instant::now();
    let sub = neuronet_core::extract_subgraph(&graph, 0, 3);
    println!(
        "Subgraph depth 3: {} nodes, {} edges in {:.1}ms",
        sub.node_count,
        sub.edges.len(),
        ms(t)
    );

    let t = Instant::now();
    match neuronet_core::highest_out_degree(&graph) {
        Some(d) => println!(
            "Highest out-degree: node {} ({}) in {:.1}ms",
            d.node_id,
            d.out_degree,
            ms(t)
        ),
        None => println!("Highest out-degree: none ({:.1}ms)", ms(t)),
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u32) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as u32
    }
}

/// Each node spawns three children, level by level. Deep BFS frontiers.
fn gen_lsystem(node_count: u32) -> EdgeList {
    let branching = 3;
    let mut edges = Vec::with_capacity(node_count as usize);
    let mut next_id: NodeId = 1;
    let mut frontier: Vec<NodeId> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                edges.push((parent, next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    EdgeList::from_pairs(edges)
}

/// Preferential attachment by sampling an endpoint of an existing edge, so
/// well-connected nodes attract more edges. Every new node also receives an
/// edge from its predecessor so node 0 reaches everything.
fn gen_scale_free(node_count: u32) -> EdgeList {
    let per_node = 10u32;
    let mut rng = FastRng::new(12345);
    let mut edges = Vec::with_capacity(node_count as usize * (per_node as usize + 1));
    let mut endpoints: Vec<NodeId> = Vec::with_capacity(node_count as usize * per_node as usize * 2);

    let seed = 5;
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push((i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        edges.push((new_node - 1, new_node));
        for _ in 0..per_node.min(new_node) {
            let target = endpoints[rng.next(endpoints.len() as u32) as usize];
            if target != new_node {
                edges.push((new_node, target));
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    EdgeList::from_pairs(edges)
}

/// Uniform random edges, ~10 per node. No structure.
fn gen_random(node_count: u32) -> EdgeList {
    let target_edges = node_count as usize * 10;
    let mut rng = FastRng::new(54321);
    let mut edges = Vec::with_capacity(target_edges);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            edges.push((from, to));
        }
    }

    EdgeList::from_pairs(edges)
}

/// Two dense clusters joined by a chain of bridge nodes. Forces BFS through
/// a bottleneck.
fn gen_barbell(node_count: u32) -> EdgeList {
    let bridge_len = 10u32;
    let cluster = (node_count - bridge_len) / 2;
    let fanout = 20u32.min(cluster - 1);
    let mut rng = FastRng::new(99999);
    let mut edges = Vec::with_capacity(cluster as usize * fanout as usize * 2 + bridge_len as usize + 2);

    let mut dense = |base: NodeId, edges: &mut Vec<(NodeId, NodeId)>| {
        for i in 0..cluster {
            for _ in 0..fanout {
                let target = rng.next(cluster);
                if target != i {
                    edges.push((base + i, base + target));
                }
            }
        }
    };

    dense(0, &mut edges);

    let bridge_start = cluster;
    edges.push((cluster - 1, bridge_start));
    for id in bridge_start + 1..bridge_start + bridge_len {
        edges.push((id - 1, id));
    }

    let b_start = bridge_start + bridge_len;
    edges.push((b_start - 1, b_start));
    dense(b_start, &mut edges);

    EdgeList::from_pairs(edges)
}
