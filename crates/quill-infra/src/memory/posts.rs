use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

/// In-memory post store.
#[derive(Default)]
pub struct MemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().filter(|p| p.author_id == author_id).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_count_by_author() {
        let repo = MemoryPostRepository::new();
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();

        repo.create(Post::new(author, "t1".into(), "c1".into(), true))
            .await
            .unwrap();
        repo.create(Post::new(author, "t2".into(), "c2".into(), false))
            .await
            .unwrap();
        repo.create(Post::new(other, "t3".into(), "c3".into(), true))
            .await
            .unwrap();

        assert_eq!(repo.count_by_author(author).await.unwrap(), 2);
        assert_eq!(repo.count_by_author(Uuid::new_v4()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let repo = MemoryPostRepository::new();
        let post = Post::new(Uuid::new_v4(), "t".into(), "c".into(), true);

        let result = repo.update(post).await;
        assert!(matches!(result.unwrap_err(), RepoError::NotFound));
    }
}
