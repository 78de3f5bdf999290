use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directed follow relationship: follower -> following.
///
/// Unique per (follower_id, following_id) pair; created on follow and deleted
/// on unfollow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowEdge {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl FollowEdge {
    /// Create a new edge.
    pub fn new(follower_id: Uuid, following_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            follower_id,
            following_id,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of the toggle-follow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Followed,
    Unfollowed,
}

impl FollowAction {
    /// Human-readable message reported to the client.
    pub fn message(&self) -> &'static str {
        match self {
            FollowAction::Followed => "Followed",
            FollowAction::Unfollowed => "Unfollowed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_messages() {
        assert_eq!(FollowAction::Followed.message(), "Followed");
        assert_eq!(FollowAction::Unfollowed.message(), "Unfollowed");
    }
}
