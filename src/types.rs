use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// User identity, unique in one graph instance.
pub type UserId = u32;

/// A community is one connected component of the (pruned) graph.
pub type Community = BTreeSet<UserId>;

/// A partition of every known user, ordered by the smallest id of each community.
pub type Partition = Vec<Community>;

// Define the User record, owned by value in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId, // Unique key, never changes.
    pub name: String, // Display name, no validation on content.
}

impl User {
    pub fn new(name: impl Into<String>, id: UserId) -> Self {
        User {
            id,
            name: name.into(),
        }
    }
}

/// Canonical undirected edge, the smaller id always comes first.
/// The derived ordering is lexicographic on (low, high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    low: UserId,
    high: UserId,
}

impl Edge {
    pub fn new(u: UserId, v: UserId) -> Self {
        // Canonicalize, so that (u, v) and (v, u) are the same key.
        if u <= v {
            Edge { low: u, high: v }
        } else {
            Edge { low: v, high: u }
        }
    }

    pub fn low(&self) -> UserId {
        self.low
    }

    pub fn high(&self) -> UserId {
        self.high
    }

    /// Return both endpoints, smaller id first.
    pub fn endpoints(&self) -> (UserId, UserId) {
        (self.low, self.high)
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

impl From<(UserId, UserId)> for Edge {
    fn from((u, v): (UserId, UserId)) -> Self {
        Edge::new(u, v)
    }
}

/// A friend suggestion together with its mutual-friend count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: UserId,
    pub mutual_count: usize,
}
