//! Application state - shared across all handlers.
//!
//! Everything is constructed once at startup and injected as `Arc`'d trait
//! objects; no component opens its own store connection per request.

use std::sync::Arc;

use quill_core::ports::{
    FollowRepository, Mailer, PasswordService, PostRepository, TokenService, UserRepository,
};
use quill_infra::auth::{Argon2PasswordService, JwtTokenService};
use quill_infra::email::{LogMailer, ResendMailer};
use quill_infra::memory::{MemoryFollowRepository, MemoryPostRepository, MemoryUserRepository};

use crate::config::AppConfig;
use crate::transport::SessionTransport;

/// Settings the handlers and auth middleware need beyond the services.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub session_transport: SessionTransport,
    pub session_ttl_seconds: u64,
    pub verification_ttl_seconds: u64,
    pub frontend_base_url: String,
    pub production: bool,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub mailer: Arc<dyn Mailer>,
    pub settings: AuthSettings,
    /// Shared store handle, kept so `main` can close it at shutdown.
    #[cfg(feature = "postgres")]
    pub db: Option<quill_infra::database::DbConn>,
}

type Repositories = (
    Arc<dyn UserRepository>,
    Arc<dyn PostRepository>,
    Arc<dyn FollowRepository>,
);

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let mailer: Arc<dyn Mailer> = match &config.email {
            Some(email) => Arc::new(ResendMailer::new(email.clone())),
            None => {
                tracing::warn!("RESEND_API_KEY not set; verification emails will only be logged");
                Arc::new(LogMailer)
            }
        };

        #[cfg(feature = "postgres")]
        let (db, (users, posts, follows)): (Option<quill_infra::database::DbConn>, Repositories) = {
            if let Some(db_config) = &config.database {
                match quill_infra::database::connect(db_config).await {
                    Ok(conn) => (
                        Some(conn.clone()),
                        (
                            Arc::new(quill_infra::PostgresUserRepository::new(conn.clone())),
                            Arc::new(quill_infra::PostgresPostRepository::new(conn.clone())),
                            Arc::new(quill_infra::PostgresFollowRepository::new(conn)),
                        ),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Self::memory_repos())
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Self::memory_repos())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, posts, follows) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Self::memory_repos()
        };

        tracing::info!("Application state initialized");

        Self {
            users,
            posts,
            follows,
            tokens,
            passwords,
            mailer,
            settings: AuthSettings {
                session_transport: config.session_transport,
                session_ttl_seconds: config.session_ttl_seconds,
                verification_ttl_seconds: config.verification_ttl_seconds,
                frontend_base_url: config.frontend_base_url.clone(),
                production: config.environment.is_production(),
            },
            #[cfg(feature = "postgres")]
            db,
        }
    }

    fn memory_repos() -> Repositories {
        (
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryPostRepository::new()),
            Arc::new(MemoryFollowRepository::new()),
        )
    }

    /// State over fresh in-memory stores, used by handler tests.
    #[cfg(test)]
    pub fn for_tests(settings: AuthSettings) -> Self {
        let (users, posts, follows) = Self::memory_repos();
        Self {
            users,
            posts,
            follows,
            tokens: Arc::new(JwtTokenService::new(quill_infra::auth::JwtConfig {
                secret: "handler-test-secret".to_string(),
                issuer: "quill-test".to_string(),
            })),
            passwords: Arc::new(Argon2PasswordService::new()),
            mailer: Arc::new(LogMailer),
            settings,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

#[cfg(test)]
impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_transport: SessionTransport::Bearer,
            session_ttl_seconds: 3600,
            verification_ttl_seconds: 1800,
            frontend_base_url: "http://localhost:3000".to_string(),
            production: false,
        }
    }
}
