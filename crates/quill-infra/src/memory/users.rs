use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{User, UserSummary};
use quill_core::error::RepoError;
use quill_core::ports::UserRepository;

/// In-memory user store using a HashMap with an async RwLock.
#[derive(Default)]
pub struct MemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        // Same uniqueness rule the database enforces with its index.
        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn list_candidates(
        &self,
        exclude: &[Uuid],
        limit: u64,
    ) -> Result<Vec<UserSummary>, RepoError> {
        let store = self.store.read().await;

        let mut candidates: Vec<&User> = store
            .values()
            .filter(|u| !exclude.contains(&u.id))
            .collect();
        // Same stable order the SQL query uses.
        candidates.sort_by_key(|u| (u.created_at, u.id));

        Ok(candidates
            .into_iter()
            .take(limit as usize)
            .map(|u| u.summary())
            .collect())
    }

    async fn find_summaries(&self, ids: &[Uuid]) -> Result<Vec<UserSummary>, RepoError> {
        let store = self.store.read().await;

        Ok(ids
            .iter()
            .filter_map(|id| store.get(id))
            .map(|u| u.summary())
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;

        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}
