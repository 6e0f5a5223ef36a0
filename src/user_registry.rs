use std::collections::BTreeMap;

use crate::types::{User, UserId};

/// Owns the user records, addressed by id.
#[derive(Debug, Default, Clone)]
pub struct UserRegistry {
    users: BTreeMap<UserId, User>,
}

#[allow(dead_code)]
impl UserRegistry {
    pub fn new() -> Self {
        UserRegistry {
            users: BTreeMap::new(),
        }
    }

    /// Insert a new user, returns false (and changes nothing) if the id is taken.
    pub fn add_user(&mut self, name: &str, id: UserId) -> bool {
        if self.users.contains_key(&id) {
            return false;
        }
        self.users.insert(id, User::new(name, id));
        true
    }

    /// Remove the user record, returns the removed record if it existed.
    /// Purging the incident edges is the caller's job, see `SocialGraph::remove_user`.
    pub fn remove_user(&mut self, id: UserId) -> Option<User> {
        self.users.remove(&id)
    }

    /// The name of the user, or an empty string when the id is unknown.
    pub fn get_name(&self, id: UserId) -> String {
        match self.users.get(&id) {
            None => String::new(),
            Some(user) => user.name.clone(),
        }
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    /// All registered ids, ascending.
    pub fn ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
