use crate::models::Follow;
use dashmap::DashMap;
use std::collections::{HashMap, HashSet, hash_map::Entry};
use tracing::{debug, info};
use uuid::Uuid;

/// Storage for follow edges.
///
/// Mutations report nothing back: following someone you already follow,
/// or yourself, ends in the same state as a fresh follow from the caller's
/// point of view. Implementations must make the duplicate check and the
/// insert a single atomic step.
pub trait FollowGraph: Send + Sync {
    /// Adds `follower -> followed` unless it is a self-edge or already exists.
    fn create_edge(&self, follower: Uuid, followed: Uuid);

    /// Removes `follower -> followed` if present.
    fn delete_edge(&self, follower: Uuid, followed: Uuid);

    fn list_followed_authors(&self, follower: Uuid) -> HashSet<Uuid>;

    fn count_followers(&self, user: Uuid) -> usize;

    fn count_following(&self, follower: Uuid) -> usize;

    fn is_following(&self, follower: Uuid, followed: Uuid) -> bool;

    /// Drops every edge `user` takes part in, on either side.
    fn remove_user(&self, user: Uuid);
}

/// Edges grouped by follower. The follower's shard lock covers the
/// existence check and the insert, so concurrent follows of the same pair
/// produce one edge.
#[derive(Default)]
pub struct InMemoryFollowGraph {
    edges: DashMap<Uuid, HashMap<Uuid, Follow>>,
}

impl InMemoryFollowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge(&self, follower: Uuid, followed: Uuid) -> Option<Follow> {
        self.edges
            .get(&follower)
            .and_then(|outgoing| outgoing.get(&followed).cloned())
    }
}

impl FollowGraph for InMemoryFollowGraph {
    fn create_edge(&self, follower: Uuid, followed: Uuid) {
        if follower == followed {
            debug!("Self-follow ignored for user {}", follower);
            return;
        }

        let mut outgoing = self.edges.entry(follower).or_default();
        match outgoing.entry(followed) {
            Entry::Occupied(_) => {
                debug!("User {} already follows {}", follower, followed);
            }
            Entry::Vacant(slot) => {
                slot.insert(Follow::new(follower, followed));
                info!("User {} followed {}", follower, followed);
            }
        }
    }

    fn delete_edge(&self, follower: Uuid, followed: Uuid) {
        let removed = match self.edges.get_mut(&follower) {
            Some(mut outgoing) => outgoing.remove(&followed).is_some(),
            None => false,
        };

        if removed {
            self.edges.remove_if(&follower, |_, outgoing| outgoing.is_empty());
            info!("User {} unfollowed {}", follower, followed);
        } else {
            debug!("User {} was not following {}", follower, followed);
        }
    }

    fn list_followed_authors(&self, follower: Uuid) -> HashSet<Uuid> {
        self.edges
            .get(&follower)
            .map(|outgoing| outgoing.keys().copied().collect())
            .unwrap_or_default()
    }

    fn count_followers(&self, user: Uuid) -> usize {
        self.edges
            .iter()
            .filter(|entry| entry.value().contains_key(&user))
            .count()
    }

    fn count_following(&self, follower: Uuid) -> usize {
        self.edges.get(&follower).map_or(0, |outgoing| outgoing.len())
    }

    fn is_following(&self, follower: Uuid, followed: Uuid) -> bool {
        self.edges
            .get(&follower)
            .is_some_and(|outgoing| outgoing.contains_key(&followed))
    }

    fn remove_user(&self, user: Uuid) {
        self.edges.retain(|follower, outgoing| {
            if *follower == user {
                return false;
            }
            outgoing.remove(&user);
            !outgoing.is_empty()
        });
    }
}
