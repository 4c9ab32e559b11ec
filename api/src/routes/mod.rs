pub mod follow;
pub mod group;
pub mod health;
pub mod post;
pub mod profile;
pub mod user;
