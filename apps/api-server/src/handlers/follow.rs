//! Follow-graph handlers: toggle follow, recommendations, profile counters.

use actix_web::{HttpResponse, web};

use quill_shared::ApiResponse;
use quill_shared::dto::{
    FollowRequest, FollowerStatsResponse, MessageResponse, RecommendationResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Upper bound on the recommendation set.
const RECOMMENDATION_LIMIT: u64 = 10;

/// POST /api/v1/follow/follow - Protected route
///
/// Toggle semantics: one endpoint both follows and unfollows, reporting which
/// happened.
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<FollowRequest>,
) -> AppResult<HttpResponse> {
    let following_id = body.into_inner().following_id;

    if following_id == identity.user_id() {
        return Err(AppError::Validation(vec![
            "followingId: cannot follow yourself".to_string(),
        ]));
    }

    if state.users.find_by_id(following_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let action = state.follows.toggle(identity.user_id(), following_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: action.message().to_string(),
    }))
}

/// GET /api/v1/follow/recommendations - Protected route
pub async fn recommendations(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    // The exclusion set always contains the caller, even with nothing
    // followed yet.
    let mut excluded = state.follows.following_ids(identity.user_id()).await?;
    excluded.push(identity.user_id());

    let candidates = state
        .users
        .list_candidates(&excluded, RECOMMENDATION_LIMIT)
        .await?;

    let data: Vec<RecommendationResponse> = candidates
        .into_iter()
        .map(|u| RecommendationResponse {
            id: u.id,
            name: u.name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// GET /api/v1/follow/followers/details - Protected route
pub async fn follower_details(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user_id = identity.user_id();

    // Three independent counts; issue them concurrently and join.
    let (follower_count, following_count, post_count) = futures::try_join!(
        state.follows.follower_count(user_id),
        state.follows.following_count(user_id),
        state.posts.count_by_author(user_id),
    )?;

    Ok(HttpResponse::Ok().json(FollowerStatsResponse {
        follower_count,
        following_count,
        post_count,
    }))
}
