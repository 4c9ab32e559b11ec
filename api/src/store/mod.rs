mod follow_graph;
mod groups;
mod posts;
mod users;

pub use follow_graph::{FollowGraph, InMemoryFollowGraph};
pub use groups::GroupStore;
pub use posts::PostStore;
pub use users::UserDirectory;
