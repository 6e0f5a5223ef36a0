use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::adjacency::AdjacencyStore;
use crate::types::UserId;
use crate::user_registry::UserRegistry;

/// Unweighted shortest path from `start_id` to `end_id`, both ends inclusive.
/// Returns an empty path if either id is unknown or `end_id` is unreachable.
pub fn shortest_path(
    registry: &UserRegistry,
    adj: &AdjacencyStore,
    start_id: UserId,
    end_id: UserId,
) -> Vec<UserId> {
    if !registry.contains(start_id) || !registry.contains(end_id) {
        return vec![];
    }

    // Parent pointers of the BFS tree, first discovery wins.
    // The start vertex is its own root and has no parent.
    let mut parent: HashMap<UserId, Option<UserId>> = HashMap::new();
    let mut queue: VecDeque<UserId> = VecDeque::new();
    parent.insert(start_id, None);
    queue.push_back(start_id);

    // Walk the whole reachable component.
    while let Some(current) = queue.pop_front() {
        for &neighbor in adj.neighbors(current) {
            if !parent.contains_key(&neighbor) {
                parent.insert(neighbor, Some(current));
                queue.push_back(neighbor);
            }
        }
    }

    // Trace back from the target.
    let mut path = vec![];
    let mut cursor = Some(end_id);
    while let Some(vertex) = cursor {
        match parent.get(&vertex) {
            None => {
                // Never discovered, so no path.
                return vec![];
            }
            Some(pre) => {
                path.push(vertex);
                cursor = *pre;
            }
        }
    }

    if path.last() != Some(&start_id) {
        return vec![];
    }
    path.reverse();
    path
}

/// Hop distance from `start_id` to every user it can reach (itself at 0).
/// Empty for an unknown id.
pub fn distances_from(
    registry: &UserRegistry,
    adj: &AdjacencyStore,
    start_id: UserId,
) -> BTreeMap<UserId, usize> {
    let mut distances = BTreeMap::new();
    if !registry.contains(start_id) {
        return distances;
    }
    let mut queue = VecDeque::new();
    distances.insert(start_id, 0usize);
    queue.push_back(start_id);

    while let Some(current) = queue.pop_front() {
        let current_distance = distances[&current];
        for &neighbor in adj.neighbors(current) {
            if !distances.contains_key(&neighbor) {
                distances.insert(neighbor, current_distance + 1);
                queue.push_back(neighbor);
            }
        }
    }
    distances
}
