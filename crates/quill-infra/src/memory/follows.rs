use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{FollowAction, FollowEdge};
use quill_core::error::RepoError;
use quill_core::ports::FollowRepository;

/// In-memory follow graph, keyed by the (follower, following) pair.
#[derive(Default)]
pub struct MemoryFollowRepository {
    store: RwLock<HashMap<(Uuid, Uuid), FollowEdge>>,
}

impl MemoryFollowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FollowRepository for MemoryFollowRepository {
    async fn toggle(
        &self,
        follower_id: Uuid,
        following_id: Uuid,
    ) -> Result<FollowAction, RepoError> {
        let mut store = self.store.write().await;
        let key = (follower_id, following_id);

        if store.remove(&key).is_some() {
            Ok(FollowAction::Unfollowed)
        } else {
            store.insert(key, FollowEdge::new(follower_id, following_id));
            Ok(FollowAction::Followed)
        }
    }

    async fn following_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let store = self.store.read().await;

        Ok(store
            .keys()
            .filter(|(follower, _)| *follower == follower_id)
            .map(|(_, following)| *following)
            .collect())
    }

    async fn follower_count(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.keys().filter(|(_, f)| *f == user_id).count() as u64)
    }

    async fn following_count(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.keys().filter(|(f, _)| *f == user_id).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_alternates() {
        let repo = MemoryFollowRepository::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(repo.toggle(a, b).await.unwrap(), FollowAction::Followed);
        assert_eq!(repo.toggle(a, b).await.unwrap(), FollowAction::Unfollowed);
        assert_eq!(repo.toggle(a, b).await.unwrap(), FollowAction::Followed);
    }

    #[tokio::test]
    async fn test_edges_are_directed() {
        let repo = MemoryFollowRepository::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        repo.toggle(a, b).await.unwrap();
        repo.toggle(c, a).await.unwrap();

        assert_eq!(repo.following_ids(a).await.unwrap(), vec![b]);
        assert_eq!(repo.follower_count(a).await.unwrap(), 1);
        assert_eq!(repo.following_count(a).await.unwrap(), 1);
        assert_eq!(repo.follower_count(b).await.unwrap(), 1);
        assert_eq!(repo.following_count(b).await.unwrap(), 0);
    }
}
