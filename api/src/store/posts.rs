use crate::models::Post;
use dashmap::DashMap;
use std::{
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use uuid::Uuid;

/// Posts by id. Every listing comes back newest first, with insertion
/// order breaking ties between equal timestamps.
#[derive(Clone, Default)]
pub struct PostStore {
    posts: Arc<DashMap<Uuid, Post>>,
    next_seq: Arc<AtomicU64>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, mut post: Post) -> Post {
        post.seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.posts.insert(post.id, post.clone());
        post
    }

    pub fn get(&self, id: &Uuid) -> Option<Post> {
        self.posts.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &Uuid) -> Option<Post> {
        self.posts.remove(id).map(|(_, post)| post)
    }

    pub fn remove_by_author(&self, author_id: Uuid) -> usize {
        let before = self.posts.len();
        self.posts.retain(|_, post| post.author_id != author_id);
        before.saturating_sub(self.posts.len())
    }

    pub fn all(&self) -> Vec<Post> {
        self.collect(|_| true)
    }

    pub fn by_author(&self, author_id: Uuid) -> Vec<Post> {
        self.collect(|post| post.author_id == author_id)
    }

    pub fn by_authors(&self, authors: &HashSet<Uuid>) -> Vec<Post> {
        if authors.is_empty() {
            return Vec::new();
        }
        self.collect(|post| authors.contains(&post.author_id))
    }

    pub fn by_group(&self, group_id: Uuid) -> Vec<Post> {
        self.collect(|post| post.group_id == Some(group_id))
    }

    /// Detaches posts from a deleted group. The posts themselves stay.
    pub fn clear_group(&self, group_id: Uuid) -> usize {
        let mut cleared = 0;
        for mut entry in self.posts.iter_mut() {
            if entry.group_id == Some(group_id) {
                entry.group_id = None;
                cleared += 1;
            }
        }
        cleared
    }

    pub fn count_by_author(&self, author_id: Uuid) -> usize {
        self.posts
            .iter()
            .filter(|entry| entry.value().author_id == author_id)
            .count()
    }

    fn collect(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        // Sort by creation date (newest first)
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        posts
    }
}
