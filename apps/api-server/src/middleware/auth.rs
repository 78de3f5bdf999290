//! Authentication middleware and extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::Future;
use std::pin::Pin;

use quill_core::domain::User;
use quill_core::ports::AuthError;
use quill_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.name)
/// }
/// ```
///
/// Resolution is a gate, not a transform: extract the token via the active
/// session transport, verify signature and expiry, then confirm the subject
/// still exists in the store - a deleted account with a live token is
/// rejected. Any missing edge short-circuits with 401 before the handler
/// runs; nothing is mutated.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

impl Identity {
    pub fn user_id(&self) -> uuid::Uuid {
        self.user.id
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub enum AuthenticationError {
    Auth(AuthError),
    Internal,
}

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthenticationError::Auth(e) => write!(f, "{}", e),
            AuthenticationError::Internal => write!(f, "Internal error during authentication"),
        }
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            AuthenticationError::Auth(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            AuthenticationError::Internal => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        // One generic body for every auth failure: the client learns nothing
        // about which edge of the state machine rejected it.
        let error = match self {
            AuthenticationError::Auth(_) => ErrorResponse::unauthorized(),
            AuthenticationError::Internal => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let req = req.clone();

        Box::pin(async move {
            let state = match state {
                Some(state) => state,
                None => {
                    tracing::error!("AppState not found in app data");
                    return Err(AuthenticationError::Internal);
                }
            };

            let token = state
                .settings
                .session_transport
                .extract(&req)
                .ok_or(AuthenticationError::Auth(AuthError::MissingAuth))?;

            let claims = state
                .tokens
                .verify(&token)
                .map_err(AuthenticationError::Auth)?;

            let user = state
                .users
                .find_by_id(claims.user_id)
                .await
                .map_err(|e| {
                    tracing::error!("Identity lookup failed: {}", e);
                    AuthenticationError::Internal
                })?
                .ok_or(AuthenticationError::Auth(AuthError::UnknownUser))?;

            Ok(Identity { user })
        })
    }
}
