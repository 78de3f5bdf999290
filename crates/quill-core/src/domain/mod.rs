//! Domain entities.

mod follow;
mod post;
mod user;

pub use follow::{FollowAction, FollowEdge};
pub use post::Post;
pub use user::{User, UserSummary};
