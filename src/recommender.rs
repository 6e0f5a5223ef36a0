use std::collections::HashMap;

use itertools::Itertools;

use crate::adjacency::AdjacencyStore;
use crate::types::{Suggestion, UserId};

/// Friends-of-friends of `id`, with the number of mutual friends each one shares.
/// Excludes `id` itself and its direct neighbors.
/// Sorted by descending mutual count, ties by ascending id.
pub fn suggest_friends_with_counts(adj: &AdjacencyStore, id: UserId) -> Vec<Suggestion> {
    let direct = adj.neighbors(id);
    let mut mutual_count: HashMap<UserId, usize> = HashMap::new();
    for friend in direct {
        for &candidate in adj.neighbors(*friend) {
            if candidate != id && !direct.contains(&candidate) {
                *mutual_count.entry(candidate).or_insert(0) += 1;
            }
        }
    }

    mutual_count
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .map(|(id, mutual_count)| Suggestion { id, mutual_count })
        .collect()
}

/// Suggested ids only, same order as `suggest_friends_with_counts`.
pub fn suggest_friends(adj: &AdjacencyStore, id: UserId) -> Vec<UserId> {
    suggest_friends_with_counts(adj, id)
        .into_iter()
        .map(|suggestion| suggestion.id)
        .collect()
}

#[cfg(test)]
mod test_recommender {
    use crate::adjacency::AdjacencyStore;
    use crate::recommender::{suggest_friends, suggest_friends_with_counts};
    use crate::types::Suggestion;

    fn generate_example() -> AdjacencyStore {
        // 1 knows 2, 3 and 4.
        // 5 shares 2 and 3 with 1, 6 and 7 share one friend each.
        let mut adj = AdjacencyStore::new();
        for (u, v) in [(1, 2), (1, 3), (1, 4), (2, 5), (3, 5), (4, 7), (2, 6), (2, 3)] {
            adj.insert_edge(u, v);
        }
        adj
    }

    #[test]
    fn test_suggest_order() {
        let adj = generate_example();
        assert_eq!(suggest_friends(&adj, 1), vec![5, 6, 7]);
        assert_eq!(
            suggest_friends_with_counts(&adj, 1),
            vec![
                Suggestion { id: 5, mutual_count: 2 },
                Suggestion { id: 6, mutual_count: 1 },
                Suggestion { id: 7, mutual_count: 1 },
            ]
        );
    }

    #[test]
    fn test_suggest_exclusion() {
        let adj = generate_example();
        for id in 1..=7 {
            let suggestions = suggest_friends(&adj, id);
            assert!(!suggestions.contains(&id));
            for neighbor in adj.neighbors(id) {
                assert!(!suggestions.contains(neighbor));
            }
        }
    }

    #[test]
    fn test_suggest_isolated() {
        let mut adj = generate_example();
        assert!(suggest_friends(&adj, 42).is_empty());
        adj.insert_edge(8, 9);
        // 9 only knows 8, and 8 knows no one else.
        assert!(suggest_friends(&adj, 9).is_empty());
    }
}
