mod requests;
mod responses;

pub use requests::{CreateGroupRequest, CreatePostRequest, PageParams};
pub use responses::{Found, GroupResponse, ProfileResponse, UserResponse};
