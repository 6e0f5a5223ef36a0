use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Edge, UserId};

/// Adjacency sets, sorted so every traversal visits neighbors in ascending id.
type AdjMap = BTreeMap<UserId, BTreeSet<UserId>>;

static EMPTY_NEIGHBORS: BTreeSet<UserId> = BTreeSet::new();

/// The undirected adjacency relation.
/// Keeps `v in adj[u] <=> u in adj[v]`, with no self-loops and no multi-edges.
/// Cloning it gives the owned snapshot used by community detection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AdjacencyStore {
    adj_map: AdjMap,
    e_size: usize, // Undirected edge count.
}

#[allow(dead_code)]
impl AdjacencyStore {
    pub fn new() -> Self {
        AdjacencyStore {
            adj_map: AdjMap::new(),
            e_size: 0,
        }
    }

    /// Insert the undirected edge (u, v), returns true if it was not present.
    /// Endpoint validity is checked by the caller against the registry.
    pub fn insert_edge(&mut self, u: UserId, v: UserId) -> bool {
        if u == v {
            return false;
        }
        let inserted = self.adj_map.entry(u).or_default().insert(v);
        self.adj_map.entry(v).or_default().insert(u);
        if inserted {
            self.e_size += 1;
        }
        inserted
    }

    /// Remove the undirected edge (u, v) from both sides, returns true if it was present.
    pub fn remove_edge(&mut self, u: UserId, v: UserId) -> bool {
        let mut removed = false;
        if let Some(neighbors) = self.adj_map.get_mut(&u) {
            removed |= neighbors.remove(&v);
        }
        if let Some(neighbors) = self.adj_map.get_mut(&v) {
            removed |= neighbors.remove(&u);
        }
        if removed {
            self.e_size -= 1;
        }
        removed
    }

    /// Drop the neighbor set of `u` and every reference to `u`.
    /// Returns the number of purged edges.
    pub fn remove_vertex(&mut self, u: UserId) -> usize {
        let neighbors = match self.adj_map.remove(&u) {
            None => return 0,
            Some(neighbors) => neighbors,
        };
        for neighbor in &neighbors {
            if let Some(others) = self.adj_map.get_mut(neighbor) {
                others.remove(&u);
            }
        }
        self.e_size -= neighbors.len();
        neighbors.len()
    }

    /// Neighbors of `u`, an unknown id behaves as an empty set.
    pub fn neighbors(&self, u: UserId) -> &BTreeSet<UserId> {
        self.adj_map.get(&u).unwrap_or(&EMPTY_NEIGHBORS)
    }

    pub fn has_edge(&self, u: UserId, v: UserId) -> bool {
        self.neighbors(u).contains(&v)
    }

    pub fn degree(&self, u: UserId) -> usize {
        self.neighbors(u).len()
    }

    pub fn edge_count(&self) -> usize {
        self.e_size
    }

    pub fn has_edges(&self) -> bool {
        self.e_size > 0
    }

    /// All edges in canonical form, ascending.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.e_size);
        for (u, neighbors) in &self.adj_map {
            for v in neighbors.iter().filter(|v| *v > u) {
                edges.push(Edge::new(*u, *v));
            }
        }
        edges
    }

    /// Check the symmetry invariant over the whole relation.
    pub fn is_symmetric(&self) -> bool {
        self.adj_map.iter().all(|(u, neighbors)| {
            neighbors.iter().all(|v| v != u && self.has_edge(*v, *u))
        })
    }

    pub(crate) fn print_graph(&self) {
        println!("Adjacency:");
        for (u, neighbors) in &self.adj_map {
            print!("{}->", u);
            for v in neighbors {
                print!("{}->", v)
            }
            println!("END");
        }
    }
}

#[cfg(test)]
mod test_adjacency {
    use crate::adjacency::AdjacencyStore;
    use crate::types::Edge;

    fn generate_example() -> AdjacencyStore {
        let mut adj = AdjacencyStore::new();
        adj.insert_edge(1, 2);
        adj.insert_edge(1, 3);
        adj.insert_edge(2, 3);
        adj.insert_edge(3, 4);
        adj
    }

    #[test]
    fn test_insert_edge() {
        let mut adj = generate_example();
        assert_eq!(adj.edge_count(), 4);
        assert!(adj.has_edge(3, 1) && adj.has_edge(1, 3));
        // Idempotent.
        let before = adj.clone();
        assert!(!adj.insert_edge(2, 1));
        assert_eq!(adj, before);
        adj.print_graph();
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut adj = AdjacencyStore::new();
        assert!(!adj.insert_edge(5, 5));
        assert_eq!(adj.edge_count(), 0);
        assert!(adj.neighbors(5).is_empty());
    }

    #[test]
    fn test_remove_edge() {
        let mut adj = generate_example();
        assert!(adj.remove_edge(3, 2));
        assert!(!adj.has_edge(2, 3) && !adj.has_edge(3, 2));
        assert!(!adj.remove_edge(3, 2));
        // Unknown endpoints are a no-op.
        assert!(!adj.remove_edge(10, 11));
        assert_eq!(adj.edge_count(), 3);
        assert!(adj.is_symmetric());
    }

    #[test]
    fn test_remove_vertex() {
        let mut adj = generate_example();
        assert_eq!(adj.remove_vertex(3), 3);
        assert_eq!(adj.edges(), vec![Edge::new(1, 2)]);
        assert!(adj.neighbors(3).is_empty());
        assert!(!adj.neighbors(4).contains(&3));
        assert_eq!(adj.remove_vertex(3), 0);
        assert!(adj.is_symmetric());
    }

    #[test]
    fn test_edges_canonical() {
        let adj = generate_example();
        assert_eq!(
            adj.edges(),
            vec![Edge::new(1, 2), Edge::new(1, 3), Edge::new(2, 3), Edge::new(3, 4)]
        );
        assert_eq!(adj.degree(3), 3);
        assert_eq!(adj.degree(42), 0);
    }
}
