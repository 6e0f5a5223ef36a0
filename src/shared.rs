use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::community::DetectionStep;
use crate::social_graph::SocialGraph;
use crate::types::{Suggestion, UserId};

/// A cloneable handle guarding one whole graph with a single lock.
/// Mutations take the write lock, queries take the read lock.
#[derive(Clone, Default)]
pub struct SharedSocialGraph {
    inner: Arc<RwLock<SocialGraph>>,
}

impl SharedSocialGraph {
    pub fn new(graph: SocialGraph) -> Self {
        SharedSocialGraph {
            inner: Arc::new(RwLock::new(graph)),
        }
    }

    pub fn add_user(&self, name: &str, id: UserId) {
        self.inner.write().add_user(name, id)
    }

    pub fn remove_user(&self, id: UserId) {
        self.inner.write().remove_user(id)
    }

    pub fn get_name(&self, id: UserId) -> String {
        self.inner.read().get_name(id)
    }

    pub fn add_connection(&self, id1: UserId, id2: UserId) {
        self.inner.write().add_connection(id1, id2)
    }

    pub fn remove_connection(&self, id1: UserId, id2: UserId) {
        self.inner.write().remove_connection(id1, id2)
    }

    pub fn shortest_path(&self, start_id: UserId, end_id: UserId) -> Vec<UserId> {
        self.inner.read().shortest_path(start_id, end_id)
    }

    pub fn suggest_friends(&self, id: UserId) -> Vec<UserId> {
        self.inner.read().suggest_friends(id)
    }

    pub fn suggest_friends_with_counts(&self, id: UserId) -> Vec<Suggestion> {
        self.inner.read().suggest_friends_with_counts(id)
    }

    /// Detection works on its own snapshot, a read lock is enough.
    pub fn detect_communities(&self) -> Vec<BTreeSet<UserId>> {
        self.inner.read().detect_communities()
    }

    pub fn detect_community_history(&self) -> Vec<DetectionStep> {
        self.inner.read().detect_community_history()
    }

    /// Run `f` against the graph under the read lock.
    pub fn with_graph<R>(&self, f: impl FnOnce(&SocialGraph) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run `f` against the graph under the write lock, for batched mutations.
    pub fn with_graph_mut<R>(&self, f: impl FnOnce(&mut SocialGraph) -> R) -> R {
        f(&mut *self.inner.write())
    }
}
