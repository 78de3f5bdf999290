//! End-to-end handler tests over the in-memory repositories.

use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use quill_core::domain::{Post, User};

use crate::handlers::configure_routes;
use crate::state::{AppState, AuthSettings};
use crate::transport::SessionTransport;

/// Insert a user directly into the store and hand back a bearer token.
async fn seed_user(
    state: &AppState,
    email: &str,
    name: &str,
    password: &str,
    verified: bool,
) -> (Uuid, String) {
    let hash = state.passwords.hash(password).unwrap();
    let mut user = User::new(email.to_string(), name.to_string(), hash);
    user.verified = verified;
    let user = state.users.create(user).await.unwrap();
    let token = state.tokens.issue(user.id, 3600).unwrap();
    (user.id, token)
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_signup_verify_signin_roundtrip() {
    let state = AppState::for_tests(AuthSettings::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    // Signup issues a verification token.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(json!({"email": "a@x.com", "password": "p1-long-enough", "name": "Alice"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let signup_token = body["token"].as_str().unwrap().to_string();
    let signup_subject = state.tokens.verify(&signup_token).unwrap().user_id;

    // Signin before verification is refused even with the right password.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signin")
            .set_json(json!({"email": "a@x.com", "password": "p1-long-enough"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    // Follow the emailed link.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/user/verify-email?token={signup_token}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // Wrong password: generic 401, nothing about which part was wrong.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signin")
            .set_json(json!({"email": "a@x.com", "password": "wrong-password"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Unauthorized");
    assert!(body.get("detail").is_none());

    // Unknown email gets the identical rejection.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signin")
            .set_json(json!({"email": "nobody@x.com", "password": "p1-long-enough"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    // Correct credentials: session token resolving to the signup subject.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signin")
            .set_json(json!({"email": "a@x.com", "password": "p1-long-enough"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let session_token = body["token"].as_str().unwrap().to_string();
    assert_eq!(
        state.tokens.verify(&session_token).unwrap().user_id,
        signup_subject
    );

    // The session token resolves to the profile.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user/me")
            .insert_header(bearer(&session_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "a@x.com");
    assert_eq!(body["data"]["verified"], true);
    assert!(body["data"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn test_signup_duplicate_email_conflicts() {
    let state = AppState::for_tests(AuthSettings::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let payload = json!({"email": "dup@x.com", "password": "p1-long-enough", "name": "Dup"});

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_signup_validation_enumerates_fields() {
    let state = AppState::for_tests(AuthSettings::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signup")
            .set_json(json!({"email": "not-an-email", "password": "short", "name": ""}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_follow_toggle_roundtrip() {
    let state = AppState::for_tests(AuthSettings::default());
    let (_, token_a) = seed_user(&state, "a@x.com", "Alice", "p1-long-enough", true).await;
    let (id_b, _) = seed_user(&state, "b@x.com", "Bob", "p2-long-enough", true).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    for expected in ["Followed", "Unfollowed", "Followed"] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/follow/follow")
                .insert_header(bearer(&token_a))
                .set_json(json!({"followingId": id_b}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], expected);
    }
}

#[actix_web::test]
async fn test_follow_rejects_self_and_unknown_target() {
    let state = AppState::for_tests(AuthSettings::default());
    let (id_a, token_a) = seed_user(&state, "a@x.com", "Alice", "p1-long-enough", true).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/follow")
            .insert_header(bearer(&token_a))
            .set_json(json!({"followingId": id_a}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/follow/follow")
            .insert_header(bearer(&token_a))
            .set_json(json!({"followingId": Uuid::new_v4()}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_recommendations_exclude_self_and_followed() {
    let state = AppState::for_tests(AuthSettings::default());
    let (id_a, token_a) = seed_user(&state, "a@x.com", "Alice", "p1-long-enough", true).await;
    let (id_b, _) = seed_user(&state, "b@x.com", "Bob", "p2-long-enough", true).await;
    let (id_c, _) = seed_user(&state, "c@x.com", "Cara", "p3-long-enough", true).await;

    state.follows.toggle(id_a, id_b).await.unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/follow/recommendations")
            .insert_header(bearer(&token_a))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], json!(id_c));
    assert_eq!(data[0]["name"], "Cara");
}

#[actix_web::test]
async fn test_follower_details_counts() {
    let state = AppState::for_tests(AuthSettings::default());
    let (id_a, token_a) = seed_user(&state, "a@x.com", "Alice", "p1-long-enough", true).await;
    let (id_b, _) = seed_user(&state, "b@x.com", "Bob", "p2-long-enough", true).await;
    let (id_c, _) = seed_user(&state, "c@x.com", "Cara", "p3-long-enough", true).await;

    state.follows.toggle(id_a, id_b).await.unwrap();
    state.follows.toggle(id_c, id_a).await.unwrap();
    state
        .posts
        .create(Post::new(id_a, "title".into(), "content".into(), true))
        .await
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/follow/followers/details")
            .insert_header(bearer(&token_a))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["followerCount"], 1);
    assert_eq!(body["followingCount"], 1);
    assert_eq!(body["postCount"], 1);
}

#[actix_web::test]
async fn test_auth_gate_rejects_bad_credentials() {
    let state = AppState::for_tests(AuthSettings::default());
    let (id_a, token_a) = seed_user(&state, "a@x.com", "Alice", "p1-long-enough", true).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    // Missing token.
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/user/me").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    // Garbage token.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user/me")
            .insert_header(bearer("garbage"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    // Valid token whose account no longer exists.
    state.users.delete(id_a).await.unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user/me")
            .insert_header(bearer(&token_a))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_cookie_transport_sets_and_accepts_cookie() {
    let state = AppState::for_tests(AuthSettings {
        session_transport: SessionTransport::Cookie,
        ..AuthSettings::default()
    });
    seed_user(&state, "a@x.com", "Alice", "p1-long-enough", true).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/signin")
            .set_json(json!({"email": "a@x.com", "password": "p1-long-enough"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "token")
        .expect("signin should set the session cookie")
        .into_owned();
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/user/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "a@x.com");
}

#[actix_web::test]
async fn test_profile_updates_persist() {
    let state = AppState::for_tests(AuthSettings::default());
    let (id_a, token_a) = seed_user(&state, "a@x.com", "Alice", "p1-long-enough", true).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/update/profile")
            .insert_header(bearer(&token_a))
            .set_json(json!({"bio": "writer of things"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/update/profile-picture")
            .insert_header(bearer(&token_a))
            .set_json(json!({"picture": "https://cdn.example.com/alice.png"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let user = state.users.find_by_id(id_a).await.unwrap().unwrap();
    assert_eq!(user.bio.as_deref(), Some("writer of things"));
    assert_eq!(
        user.picture.as_deref(),
        Some("https://cdn.example.com/alice.png")
    );
    assert_eq!(user.name, "Alice");

    // Non-URL picture is a validation failure.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/user/update/profile-picture")
            .insert_header(bearer(&token_a))
            .set_json(json!({"picture": "javascript:alert(1)"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_blog_crud_with_ownership() {
    let state = AppState::for_tests(AuthSettings::default());
    let (_, token_a) = seed_user(&state, "a@x.com", "Alice", "p1-long-enough", true).await;
    let (_, token_b) = seed_user(&state, "b@x.com", "Bob", "p2-long-enough", true).await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/blog/create")
            .insert_header(bearer(&token_a))
            .set_json(json!({"title": "Hello", "content": "First post", "published": true}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let post_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["author"]["name"], "Alice");

    // Someone else cannot edit it.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/blog/update/{post_id}"))
            .insert_header(bearer(&token_b))
            .set_json(json!({"title": "Hijacked"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    // The author can.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/blog/update/{post_id}"))
            .insert_header(bearer(&token_a))
            .set_json(json!({"title": "Hello, again"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/blog/{post_id}"))
            .insert_header(bearer(&token_b))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["title"], "Hello, again");
    assert_eq!(body["data"]["author"]["name"], "Alice");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/blog/get/bulk")
            .insert_header(bearer(&token_b))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Unknown post id.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/blog/{}", Uuid::new_v4()))
            .insert_header(bearer(&token_b))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}
