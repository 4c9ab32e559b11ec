use crate::{
    models::Post,
    pagination::{Page, Paginator},
    store::{FollowGraph, PostStore},
};
use uuid::Uuid;

/// Posts written by everyone `user` follows, newest first, cut to one page.
///
/// Following nobody is not an error: the result is an empty page.
pub fn get_feed(
    follows: &dyn FollowGraph,
    posts: &PostStore,
    user: Uuid,
    page_number: usize,
    page_size: usize,
) -> Page<Post> {
    let authors = follows.list_followed_authors(user);
    if authors.is_empty() {
        return Page::empty(page_size);
    }

    Paginator::new(posts.by_authors(&authors), page_size).get_page(page_number)
}
