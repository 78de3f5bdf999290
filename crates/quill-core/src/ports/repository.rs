use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{FollowAction, Post, User, UserSummary};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Email uniqueness is enforced at the store level
    /// and surfaces as [`RepoError::Constraint`].
    async fn create(&self, user: User) -> Result<User, RepoError>;

    /// Persist changes to an existing user (profile fields, verified flag).
    async fn update(&self, user: User) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user by their email address (case-sensitive as stored).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Users eligible as follow recommendations: everyone except `exclude`,
    /// in creation order (oldest first, id as tie-break), at most `limit`.
    async fn list_candidates(
        &self,
        exclude: &[Uuid],
        limit: u64,
    ) -> Result<Vec<UserSummary>, RepoError>;

    /// Public summaries for a set of user ids. Unknown ids are skipped.
    async fn find_summaries(&self, ids: &[Uuid]) -> Result<Vec<UserSummary>, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: Post) -> Result<Post, RepoError>;

    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// All posts, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Number of posts authored by `author_id`.
    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError>;
}

/// Follow-graph repository: directed edges follower -> following.
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Toggle the edge (follower, following): delete it if it exists,
    /// create it otherwise, and report which happened.
    async fn toggle(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<FollowAction, RepoError>;

    /// Ids of every user that `follower_id` currently follows.
    async fn following_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>, RepoError>;

    /// Number of users following `user_id`.
    async fn follower_count(&self, user_id: Uuid) -> Result<u64, RepoError>;

    /// Number of users `user_id` follows.
    async fn following_count(&self, user_id: Uuid) -> Result<u64, RepoError>;
}
