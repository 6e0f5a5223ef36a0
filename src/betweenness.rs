use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::adjacency::AdjacencyStore;
use crate::config::SCORE_EPSILON;
use crate::types::{Edge, UserId};
use crate::user_registry::UserRegistry;

/// Accumulated betweenness per canonical edge.
pub type EdgeBetweenness = BTreeMap<Edge, f64>;

/// Per-source shortest path bookkeeping of one BFS.
struct SourceState {
    distance: HashMap<UserId, i64>, // -1 until discovered.
    path_count: HashMap<UserId, f64>, // Number of shortest paths from the source.
    predecessors: HashMap<UserId, Vec<UserId>>, // Predecessors on shortest paths.
    stack: Vec<UserId>, // Discovery order, popped in reverse.
}

impl SourceState {
    fn new(registry: &UserRegistry) -> Self {
        let mut distance = HashMap::with_capacity(registry.len());
        let mut path_count = HashMap::with_capacity(registry.len());
        for id in registry.ids() {
            distance.insert(id, -1);
            path_count.insert(id, 0.0);
        }
        SourceState {
            distance,
            path_count,
            predecessors: HashMap::new(),
            stack: Vec::with_capacity(registry.len()),
        }
    }

    /// BFS from `source`, counting shortest paths and recording predecessors.
    fn explore(&mut self, adj: &AdjacencyStore, source: UserId) {
        let mut queue = VecDeque::new();
        self.distance.insert(source, 0);
        self.path_count.insert(source, 1.0);
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            self.stack.push(node);
            let node_distance = self.distance[&node];
            let node_paths = self.path_count[&node];
            for &neighbor in adj.neighbors(node) {
                let neighbor_distance = self.distance.entry(neighbor).or_insert(-1);
                if *neighbor_distance < 0 {
                    *neighbor_distance = node_distance + 1;
                    queue.push_back(neighbor);
                }
                if *neighbor_distance == node_distance + 1 {
                    *self.path_count.entry(neighbor).or_insert(0.0) += node_paths;
                    self.predecessors.entry(neighbor).or_default().push(node);
                }
            }
        }
    }
}

/// Edge betweenness of `adj`, Brandes style, summed over every registered user as source.
/// Raw accumulation: no normalization and the undirected double count is kept.
pub fn calculate_edge_betweenness(registry: &UserRegistry, adj: &AdjacencyStore) -> EdgeBetweenness {
    let mut edge_betweenness = EdgeBetweenness::new();
    for source in registry.ids() {
        let mut state = SourceState::new(registry);
        state.explore(adj, source);

        // Dependencies restart at zero for every source.
        let mut dependency: HashMap<UserId, f64> = registry.ids().map(|id| (id, 0.0)).collect();
        while let Some(node) = state.stack.pop() {
            let node_paths = state.path_count[&node];
            let node_dependency = dependency.get(&node).copied().unwrap_or(0.0);
            let predecessors = match state.predecessors.get(&node) {
                None => continue,
                Some(predecessors) => predecessors,
            };
            for &predecessor in predecessors {
                let ratio = state.path_count[&predecessor] / node_paths;
                let delta = ratio * (1.0 + node_dependency);
                *edge_betweenness.entry(Edge::new(node, predecessor)).or_insert(0.0) += delta;
                *dependency.entry(predecessor).or_insert(0.0) += delta;
            }
        }
    }
    edge_betweenness
}

/// The highest scoring edge. Scores within `SCORE_EPSILON` count as equal,
/// and among equal scores the lexicographically smallest edge wins.
pub fn top_edge(edge_betweenness: &EdgeBetweenness) -> Option<(Edge, f64)> {
    let mut best: Option<(Edge, f64)> = None;
    // Ascending edge order, so only a strictly larger score may replace the current best.
    for (edge, score) in edge_betweenness {
        match best {
            Some((_, best_score)) if *score <= best_score + SCORE_EPSILON => {}
            _ => best = Some((*edge, *score)),
        }
    }
    best
}
