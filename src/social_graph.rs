use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::adjacency::AdjacencyStore;
use crate::betweenness::{calculate_edge_betweenness, EdgeBetweenness};
use crate::community::{connected_components, CommunityDetector, DetectionStep};
use crate::path_finder;
use crate::recommender;
use crate::types::{Partition, Suggestion, User, UserId};
use crate::user_registry::UserRegistry;

/// One social graph instance: the users plus the friendship relation.
/// Invalid input never fails, it resolves to an empty result or a no-op.
#[derive(Debug, Default, Clone)]
pub struct SocialGraph {
    registry: UserRegistry,
    adjacency: AdjacencyStore,
}

impl SocialGraph {
    pub fn new() -> Self {
        SocialGraph {
            registry: UserRegistry::new(),
            adjacency: AdjacencyStore::new(),
        }
    }

    /// Register a user, no-op if the id is taken.
    pub fn add_user(&mut self, name: &str, id: UserId) {
        if !self.registry.add_user(name, id) {
            debug!("User {} already exists, add ignored", id);
        }
    }

    /// Remove a user together with every incident friendship.
    pub fn remove_user(&mut self, id: UserId) {
        if self.registry.remove_user(id).is_none() {
            debug!("User {} not found, remove ignored", id);
            return;
        }
        let purged = self.adjacency.remove_vertex(id);
        debug!("Removed user {} and {} connections", id, purged);
    }

    /// Name of the user, the empty string when the id is unknown.
    pub fn get_name(&self, id: UserId) -> String {
        self.registry.get_name(id)
    }

    pub fn get_user(&self, id: UserId) -> Option<User> {
        self.registry.get(id).cloned()
    }

    /// Connect two registered, distinct users. Anything else is ignored.
    pub fn add_connection(&mut self, id1: UserId, id2: UserId) {
        if id1 == id2 {
            debug!("Self connection on {} ignored", id1);
            return;
        }
        if !self.registry.contains(id1) || !self.registry.contains(id2) {
            debug!("Connection ({}, {}) references an unknown user, ignored", id1, id2);
            return;
        }
        self.adjacency.insert_edge(id1, id2);
    }

    pub fn remove_connection(&mut self, id1: UserId, id2: UserId) {
        self.adjacency.remove_edge(id1, id2);
    }

    pub fn contains_user(&self, id: UserId) -> bool {
        self.registry.contains(id)
    }

    pub fn user_count(&self) -> usize {
        self.registry.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count()
    }

    /// Neighbors of `id` ascending, empty for an unknown id.
    pub fn neighbors(&self, id: UserId) -> Vec<UserId> {
        self.adjacency.neighbors(id).iter().copied().collect()
    }

    /// See `path_finder::shortest_path`.
    pub fn shortest_path(&self, start_id: UserId, end_id: UserId) -> Vec<UserId> {
        path_finder::shortest_path(&self.registry, &self.adjacency, start_id, end_id)
    }

    pub fn distances_from(&self, id: UserId) -> BTreeMap<UserId, usize> {
        path_finder::distances_from(&self.registry, &self.adjacency, id)
    }

    /// Friend suggestions, most mutual friends first, ties by ascending id.
    pub fn suggest_friends(&self, id: UserId) -> Vec<UserId> {
        recommender::suggest_friends(&self.adjacency, id)
    }

    pub fn suggest_friends_with_counts(&self, id: UserId) -> Vec<Suggestion> {
        recommender::suggest_friends_with_counts(&self.adjacency, id)
    }

    /// Edge betweenness of the current graph.
    pub fn edge_betweenness(&self) -> EdgeBetweenness {
        calculate_edge_betweenness(&self.registry, &self.adjacency)
    }

    pub fn connected_components(&self) -> Partition {
        connected_components(&self.registry, &self.adjacency)
    }

    /// Girvan–Newman on a private copy of the graph, run until every edge is gone.
    /// Returns the last partition, which is all singletons whenever the graph had an edge.
    pub fn detect_communities(&self) -> Vec<BTreeSet<UserId>> {
        CommunityDetector::new(&self.registry, self.adjacency.clone()).run()
    }

    /// Every intermediate step of `detect_communities`, in removal order.
    pub fn detect_community_history(&self) -> Vec<DetectionStep> {
        CommunityDetector::new(&self.registry, self.adjacency.clone()).run_with_history()
    }

    #[cfg(test)]
    pub(crate) fn adjacency_ref(&self) -> &AdjacencyStore {
        &self.adjacency
    }
}

#[cfg(test)]
mod test_social_graph {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::social_graph::SocialGraph;
    use crate::types::Edge;

    fn generate_example() -> SocialGraph {
        let mut graph = SocialGraph::new();
        for (id, name) in [(1, "Alice"), (2, "Bob"), (3, "Carol"), (4, "Dave")] {
            graph.add_user(name, id);
        }
        graph.add_connection(1, 2);
        graph.add_connection(2, 3);
        graph.add_connection(3, 4);
        graph
    }

    #[test]
    fn test_users() {
        let mut graph = generate_example();
        assert_eq!(graph.get_name(2), "Bob");
        assert_eq!(graph.get_name(99), "");
        graph.add_user("Robert", 2);
        assert_eq!(graph.get_name(2), "Bob");
        assert_eq!(graph.get_user(3).map(|u| u.name), Some("Carol".to_string()));
        assert_eq!(graph.user_count(), 4);
    }

    #[test]
    fn test_connection_validation() {
        let mut graph = generate_example();
        graph.add_connection(1, 99);
        graph.add_connection(1, 1);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.neighbors(99).is_empty());
        assert_eq!(graph.neighbors(1), vec![2]);

        // Idempotent.
        graph.add_connection(2, 1);
        assert_eq!(graph.edge_count(), 3);

        graph.remove_connection(2, 1);
        assert!(graph.neighbors(1).is_empty());
        assert!(!graph.neighbors(2).contains(&1));
        graph.remove_connection(2, 1);
        graph.remove_connection(77, 88);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_remove_user_cascade() {
        let mut graph = generate_example();
        graph.remove_user(2);
        assert!(!graph.contains_user(2));
        assert!(graph.neighbors(2).is_empty());
        assert!(graph.neighbors(1).is_empty());
        assert_eq!(graph.neighbors(3), vec![4]);
        assert_eq!(graph.edge_count(), 1);
        // Removing a connection to a vanished user is fine.
        graph.remove_connection(1, 2);
        graph.remove_user(2);
        assert!(graph.shortest_path(1, 4).is_empty());
        // A re-added user starts with no friends.
        graph.add_user("Bob", 2);
        assert!(graph.neighbors(2).is_empty());
    }

    #[test]
    fn test_queries() {
        let graph = generate_example();
        assert_eq!(graph.shortest_path(1, 4), vec![1, 2, 3, 4]);
        assert_eq!(graph.shortest_path(1, 1), vec![1]);
        assert!(graph.shortest_path(1, 99).is_empty());
        assert_eq!(graph.suggest_friends(1), vec![3]);
        assert_eq!(graph.suggest_friends(2), vec![4]);
        assert_eq!(graph.distances_from(1).get(&4), Some(&3));

        let scores = graph.edge_betweenness();
        assert!(scores[&Edge::new(2, 3)] > scores[&Edge::new(1, 2)]);
        assert!(scores[&Edge::new(2, 3)] > scores[&Edge::new(3, 4)]);
    }

    #[test]
    fn test_detect_communities() {
        let graph = generate_example();
        let communities = graph.detect_communities();
        assert_eq!(communities.len(), 4);
        assert!(communities.iter().all(|c| c.len() == 1));
        // The live graph is untouched.
        assert_eq!(graph.edge_count(), 3);

        let history = graph.detect_community_history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].removed, Edge::new(2, 3));
        let expected: Vec<BTreeSet<u32>> = vec![[1, 2].into(), [3, 4].into()];
        assert_eq!(history[0].partition, expected);
        assert_eq!(graph.connected_components().len(), 1);
    }

    #[test]
    fn test_random_mutations_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut graph = SocialGraph::new();
        let mut replay = SocialGraph::new();
        for _ in 0..2000 {
            let a = rng.gen_range(0..30u32);
            let b = rng.gen_range(0..30u32);
            match rng.gen_range(0..10) {
                0 | 1 => {
                    graph.add_user("u", a);
                    replay.add_user("u", a);
                }
                2 => {
                    graph.remove_user(a);
                    replay.remove_user(a);
                }
                3 => {
                    graph.remove_connection(a, b);
                    replay.remove_connection(a, b);
                }
                _ => {
                    graph.add_connection(a, b);
                    replay.add_connection(a, b);
                }
            }
            let adj = graph.adjacency_ref();
            assert!(adj.is_symmetric());
            for edge in adj.edges() {
                assert!(graph.contains_user(edge.low()) && graph.contains_user(edge.high()));
            }
        }
        assert_eq!(graph.adjacency_ref(), replay.adjacency_ref());
        for a in 0..30 {
            for b in 0..30 {
                assert_eq!(graph.shortest_path(a, b), replay.shortest_path(a, b));
            }
        }
        let communities = graph.detect_communities();
        assert_eq!(communities, replay.detect_communities());
        assert_eq!(communities.len(), graph.user_count());
    }
}
