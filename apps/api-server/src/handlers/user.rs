//! User account handlers: signup, signin, email verification, profile.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_shared::ApiResponse;
use quill_shared::dto::{
    AuthResponse, MessageResponse, ProfileResponse, SigninRequest, SignupRequest,
    UpdateProfilePictureRequest, UpdateProfileRequest, VerifyEmailQuery,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::transport::{self, SessionTransport};

fn profile_response(user: User) -> ProfileResponse {
    ProfileResponse {
        id: user.id,
        email: user.email,
        verified: user.verified,
        name: user.name,
        picture: user.picture,
        bio: user.bio,
        role: user.role,
        created_at: user.created_at,
    }
}

/// POST /api/v1/user/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input, enumerating every failing field.
    let mut field_errors = Vec::new();
    if req.email.is_empty() || !req.email.contains('@') {
        field_errors.push("email: must be a valid email address".to_string());
    }
    if req.name.trim().is_empty() {
        field_errors.push("name: must not be empty".to_string());
    }
    if req.password.len() < 8 {
        field_errors.push("password: must be at least 8 characters".to_string());
    }
    if !field_errors.is_empty() {
        return Err(AppError::Validation(field_errors));
    }

    // Check if the email is already taken
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = state
        .passwords
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Create user; the unique index catches a concurrent duplicate signup.
    let user = User::new(req.email, req.name, password_hash);
    let user = state.users.create(user).await.map_err(|e| match e {
        RepoError::Constraint(_) => AppError::Conflict("Email already registered".to_string()),
        other => other.into(),
    })?;

    // Short-lived token backing both the emailed link and the response body.
    let token = state
        .tokens
        .issue(user.id, state.settings.verification_ttl_seconds)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Fire-and-forget: a failed email never rolls back the signup.
    let link = format!(
        "{}/verify-email?token={}",
        state.settings.frontend_base_url.trim_end_matches('/'),
        token
    );
    let mailer = state.mailer.clone();
    let to = user.email.clone();
    tokio::spawn(async move {
        let html = format!(
            "<p>Welcome to Quill!</p>\
             <p><a href=\"{link}\">Verify your email address</a> to activate your account.</p>"
        );
        if let Err(e) = mailer.send(&to, "Verify your email address", &html).await {
            tracing::error!("Failed to send verification email: {}", e);
        }
    });

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "Signup successful, check your inbox to verify your email".to_string(),
        token,
    }))
}

/// POST /api/v1/user/signin
pub async fn signin(
    state: web::Data<AppState>,
    body: web::Json<SigninRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Unknown email and wrong password get the same generic rejection.
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = state
        .passwords
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    if !user.verified {
        return Err(AppError::Forbidden("Email not verified".to_string()));
    }

    let token = state
        .tokens
        .issue(user.id, state.settings.session_ttl_seconds)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut response = HttpResponse::Ok();
    if state.settings.session_transport == SessionTransport::Cookie {
        response.cookie(transport::session_cookie(
            &token,
            state.settings.session_ttl_seconds,
            state.settings.production,
        ));
    }

    Ok(response.json(AuthResponse {
        message: "Signin successful".to_string(),
        token,
    }))
}

/// GET /api/v1/user/verify-email?token=...
pub async fn verify_email(
    state: web::Data<AppState>,
    query: web::Query<VerifyEmailQuery>,
) -> AppResult<HttpResponse> {
    let invalid_link = || AppError::BadRequest("Invalid or expired verification link".to_string());

    let claims = state
        .tokens
        .verify(&query.token)
        .map_err(|_| invalid_link())?;

    let mut user = state
        .users
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(invalid_link)?;

    // Idempotent: re-visiting the link after verification is fine.
    if !user.verified {
        user.verified = true;
        user.updated_at = Utc::now();
        state.users.update(user).await?;
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Email verified".to_string(),
    }))
}

/// GET /api/v1/user/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile_response(identity.user))))
}

/// POST /api/v1/user/update/profile - Protected route
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let mut user = identity.user;

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation(vec![
                "name: must not be empty".to_string(),
            ]));
        }
        user.name = name;
    }
    if let Some(bio) = req.bio {
        user.bio = Some(bio);
    }
    user.updated_at = Utc::now();

    state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Profile updated".to_string(),
    }))
}

/// POST /api/v1/user/update/profile-picture - Protected route
pub async fn update_profile_picture(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfilePictureRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if !req.picture.starts_with("http://") && !req.picture.starts_with("https://") {
        return Err(AppError::Validation(vec![
            "picture: must be an http(s) URL".to_string(),
        ]));
    }

    let mut user = identity.user;
    user.picture = Some(req.picture);
    user.updated_at = Utc::now();

    state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Profile picture updated".to_string(),
    }))
}
