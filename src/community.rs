use std::collections::{BTreeSet, HashSet, VecDeque};

use log::{debug, info};
use serde::Serialize;

use crate::adjacency::AdjacencyStore;
use crate::betweenness::{calculate_edge_betweenness, top_edge};
use crate::types::{Community, Edge, Partition, UserId};
use crate::user_registry::UserRegistry;

/// One edge removal of the Girvan–Newman loop and the partition it left behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionStep {
    pub removed: Edge, // The highest betweenness edge of this round.
    pub score: f64, // Its betweenness before removal.
    pub partition: Partition, // Connected components after removal.
}

/// Girvan–Newman style community detection over an owned adjacency snapshot.
pub struct CommunityDetector<'a> {
    registry: &'a UserRegistry,
    snapshot: AdjacencyStore,
}

impl<'a> CommunityDetector<'a> {
    /// The snapshot is moved in, so the live adjacency is never touched.
    pub fn new(registry: &'a UserRegistry, snapshot: AdjacencyStore) -> Self {
        CommunityDetector { registry, snapshot }
    }

    /// Remove the highest betweenness edge and recompute the components.
    /// Returns None once the snapshot has no edge left.
    pub fn step(&mut self) -> Option<DetectionStep> {
        if !self.snapshot.has_edges() {
            return None;
        }
        let edge_betweenness = calculate_edge_betweenness(self.registry, &self.snapshot);
        let (removed, score) = top_edge(&edge_betweenness)?;
        let (u, v) = removed.endpoints();
        self.snapshot.remove_edge(u, v);

        let partition = connected_components(self.registry, &self.snapshot);
        debug!(
            "Removed edge {} with betweenness {:.3}, {} communities, {} edges left",
            removed, score, partition.len(), self.snapshot.edge_count()
        );
        Some(DetectionStep {
            removed,
            score,
            partition,
        })
    }

    /// Run until no edge remains and keep every step.
    pub fn run_with_history(mut self) -> Vec<DetectionStep> {
        let mut history = Vec::with_capacity(self.snapshot.edge_count());
        while let Some(step) = self.step() {
            history.push(step);
        }
        info!("Community detection finished after {} edge removals", history.len());
        history
    }

    /// Run until no edge remains and return only the last partition.
    /// With no edge at all this is the components of the edgeless graph.
    pub fn run(mut self) -> Partition {
        let mut latest = None;
        let mut rounds = 0usize;
        while let Some(step) = self.step() {
            latest = Some(step.partition);
            rounds += 1;
        }
        info!("Community detection finished after {} edge removals", rounds);
        match latest {
            Some(partition) => partition,
            None => connected_components(self.registry, &self.snapshot),
        }
    }
}

// Using bfs to walk through one component.
fn bfs_component(
    adj: &AdjacencyStore,
    start_vertex: UserId,
    visited: &mut HashSet<UserId>,
) -> Community {
    let mut community = BTreeSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start_vertex);
    visited.insert(start_vertex);

    while let Some(vertex) = queue.pop_front() {
        community.insert(vertex);
        for &neighbor in adj.neighbors(vertex) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    community
}

/// Connected components of every registered user over `adj`.
/// Isolated users come out as singletons, communities ordered by their smallest id.
pub fn connected_components(registry: &UserRegistry, adj: &AdjacencyStore) -> Partition {
    let mut visited = HashSet::with_capacity(registry.len());
    let mut partition = vec![];
    for vertex in registry.ids() {
        if !visited.contains(&vertex) {
            partition.push(bfs_component(adj, vertex, &mut visited));
        }
    }
    partition
}
