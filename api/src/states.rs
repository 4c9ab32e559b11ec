use crate::{
    config::Config,
    store::{FollowGraph, GroupStore, InMemoryFollowGraph, PostStore, UserDirectory},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// Cloned into every handler. All stores are behind `Arc`, so a clone is
/// a handful of reference-count bumps.
#[derive(Clone)]
pub struct AppState {
    pub users: UserDirectory,
    pub posts: PostStore,
    pub groups: GroupStore,
    pub follows: Arc<dyn FollowGraph>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_follow_graph(config, Arc::new(InMemoryFollowGraph::new()))
    }

    pub fn with_follow_graph(config: Config, follows: Arc<dyn FollowGraph>) -> Self {
        Self {
            users: UserDirectory::new(),
            posts: PostStore::new(),
            groups: GroupStore::new(),
            follows,
            config: Arc::new(config),
        }
    }

    /// Creates `follower -> author`, then drops it again if either side was
    /// removed meanwhile.
    ///
    /// Paired with `remove_user` (directory first, graph second) this leaves
    /// no edge to a deleted user: either this check sees the removal, or the
    /// removal's graph cascade runs after the edge exists.
    pub fn follow(&self, follower: Uuid, author: Uuid) {
        self.follows.create_edge(follower, author);

        if self.users.get(&follower).is_none() || self.users.get(&author).is_none() {
            self.follows.delete_edge(follower, author);
        }
    }

    /// Deletes a user together with their posts and every follow edge
    /// they are part of. Returns false if the user was unknown.
    pub fn remove_user(&self, id: Uuid) -> bool {
        // Directory first: see `follow`
        let Some(user) = self.users.remove(&id) else {
            return false;
        };

        let posts = self.posts.remove_by_author(id);
        self.follows.remove_user(id);

        info!(
            "User removed: {} ({} posts, follow edges dropped)",
            user.username, posts
        );
        true
    }

    /// Deletes a group. Its posts stay, without a group.
    pub fn remove_group(&self, slug: &str) -> bool {
        let Some(group) = self.groups.remove(slug) else {
            return false;
        };

        let detached = self.posts.clear_group(group.id);
        info!("Group removed: {} ({} posts detached)", group.slug, detached);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Post};

    #[test]
    fn remove_user_cascades() {
        let state = AppState::new(Config::new("secret"));
        let leo = state.users.register("leo").unwrap();
        let anna = state.users.register("anna").unwrap();
        state.posts.insert(Post::new(leo.id, "by leo"));
        state.posts.insert(Post::new(anna.id, "by anna"));
        state.follows.create_edge(leo.id, anna.id);
        state.follows.create_edge(anna.id, leo.id);

        assert!(state.remove_user(leo.id));

        assert!(state.users.find_by_username("leo").is_none());
        assert_eq!(state.posts.count_by_author(leo.id), 0);
        assert_eq!(state.posts.count_by_author(anna.id), 1);
        assert_eq!(state.follows.count_followers(anna.id), 0);
        assert_eq!(state.follows.count_following(anna.id), 0);
        assert!(!state.remove_user(leo.id));
    }

    #[test]
    fn follow_after_removal_leaves_no_edge() {
        let state = AppState::new(Config::new("secret"));
        let leo = state.users.register("leo").unwrap();
        let gone = state.users.register("gone").unwrap();

        // `gone` was resolved by a request before being deleted
        assert!(state.remove_user(gone.id));
        state.follow(leo.id, gone.id);

        assert_eq!(state.follows.count_following(leo.id), 0);
        assert_eq!(state.follows.count_followers(gone.id), 0);
    }

    #[test]
    fn follow_between_live_users_sticks() {
        let state = AppState::new(Config::new("secret"));
        let leo = state.users.register("leo").unwrap();
        let anna = state.users.register("anna").unwrap();

        state.follow(leo.id, anna.id);
        state.follow(leo.id, leo.id);

        assert!(state.follows.is_following(leo.id, anna.id));
        assert_eq!(state.follows.count_following(leo.id), 1);
    }

    #[test]
    fn remove_group_detaches_posts() {
        let state = AppState::new(Config::new("secret"));
        let leo = state.users.register("leo").unwrap();
        let group = state
            .groups
            .create(Group::new("Tolstoy fans", "tolstoi", ""))
            .unwrap();
        let mut post = Post::new(leo.id, "grouped");
        post.group_id = Some(group.id);
        let post = state.posts.insert(post);

        assert!(state.remove_group("tolstoi"));

        assert_eq!(state.posts.get(&post.id).unwrap().group_id, None);
        assert!(!state.remove_group("tolstoi"));
    }
}
