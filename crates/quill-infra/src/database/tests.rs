use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use quill_core::domain::FollowAction;
use quill_core::error::RepoError;
use quill_core::ports::{FollowRepository, UserRepository};

use crate::database::entity::{follow, user};
use crate::database::postgres_repo::{PostgresFollowRepository, PostgresUserRepository};

fn user_model(email: &str, verified: bool) -> user::Model {
    let now = chrono::Utc::now();
    user::Model {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        password_hash: "$argon2id$stub".to_owned(),
        verified,
        name: "Alice".to_owned(),
        picture: None,
        bio: Some("writes about databases".to_owned()),
        role: "user".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_user_by_email_maps_domain_fields() {
    let model = user_model("alice@example.com", true);
    let expected_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let found = repo.find_by_email("alice@example.com").await.unwrap();

    let user = found.expect("user should be found");
    assert_eq!(user.id, expected_id);
    assert!(user.verified);
    assert_eq!(user.bio.as_deref(), Some("writes about databases"));
}

#[tokio::test]
async fn test_toggle_deletes_existing_edge() {
    let follower = Uuid::new_v4();
    let following = Uuid::new_v4();
    let edge = follow::Model {
        id: Uuid::new_v4(),
        follower_id: follower,
        following_id: following,
        created_at: chrono::Utc::now().into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![edge]])
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresFollowRepository::new(db);

    let action = repo.toggle(follower, following).await.unwrap();
    assert_eq!(action, FollowAction::Unfollowed);
}

#[tokio::test]
async fn test_toggle_creates_missing_edge() {
    let follower = Uuid::new_v4();
    let following = Uuid::new_v4();
    let inserted = follow::Model {
        id: Uuid::new_v4(),
        follower_id: follower,
        following_id: following,
        created_at: chrono::Utc::now().into(),
    };

    // First query: edge lookup comes back empty. Second: the INSERT .. RETURNING row.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![], vec![inserted]])
        .into_connection();

    let repo = PostgresFollowRepository::new(db);

    let action = repo.toggle(follower, following).await.unwrap();
    assert_eq!(action, FollowAction::Followed);
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let result = repo.delete(Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}
