//! Blog post handlers.

use std::collections::{HashMap, HashSet};

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_shared::ApiResponse;
use quill_shared::dto::{CreatePostRequest, PostAuthor, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post, author_name: String) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        published: post.published,
        created_at: post.created_at,
        author: PostAuthor { name: author_name },
    }
}

/// POST /api/v1/blog/create - Protected route
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut field_errors = Vec::new();
    if req.title.trim().is_empty() {
        field_errors.push("title: must not be empty".to_string());
    }
    if req.content.trim().is_empty() {
        field_errors.push("content: must not be empty".to_string());
    }
    if !field_errors.is_empty() {
        return Err(AppError::Validation(field_errors));
    }

    let post = state
        .posts
        .create(Post::new(
            identity.user_id(),
            req.title,
            req.content,
            req.published,
        ))
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post, identity.user.name))))
}

/// PUT /api/v1/blog/update/{id} - Protected route
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.author_id != identity.user_id() {
        return Err(AppError::Forbidden(
            "Only the author can edit a post".to_string(),
        ));
    }

    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation(vec![
                "title: must not be empty".to_string(),
            ]));
        }
        post.title = title;
    }
    if let Some(content) = req.content {
        if content.trim().is_empty() {
            return Err(AppError::Validation(vec![
                "content: must not be empty".to_string(),
            ]));
        }
        post.content = content;
    }
    if let Some(published) = req.published {
        post.published = published;
    }
    post.updated_at = Utc::now();

    let post = state.posts.update(post).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post, identity.user.name))))
}

/// GET /api/v1/blog/{id} - Protected route
pub async fn get(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let author_name = state
        .users
        .find_summaries(&[post.author_id])
        .await?
        .into_iter()
        .next()
        .map(|s| s.name)
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post, author_name))))
}

/// GET /api/v1/blog/get/bulk - Protected route
pub async fn bulk(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;

    let author_ids: Vec<Uuid> = posts
        .iter()
        .map(|p| p.author_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let names: HashMap<Uuid, String> = state
        .users
        .find_summaries(&author_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    let data: Vec<PostResponse> = posts
        .into_iter()
        .map(|post| {
            let name = names.get(&post.author_id).cloned().unwrap_or_default();
            post_response(post, name)
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}
