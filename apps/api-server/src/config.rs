//! Application configuration assembled once at startup.
//!
//! Every knob the server needs lives in [`AppConfig`]; components receive the
//! pieces they care about by reference instead of reading the environment
//! themselves.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use quill_infra::auth::JwtConfig;
use quill_infra::database::DatabaseConfig;
use quill_infra::email::EmailConfig;

use crate::transport::SessionTransport;

/// Deployment environment flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub frontend_base_url: String,
    pub session_transport: SessionTransport,
    pub session_ttl_seconds: u64,
    pub verification_ttl_seconds: u64,
    pub jwt: JwtConfig,
    pub database: Option<DatabaseConfig>,
    pub email: Option<EmailConfig>,
}

/// Configuration errors reported before the server starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl AppConfig {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("RUST_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let secret = match env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ if environment.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            _ => {
                tracing::warn!("JWT_SECRET not set; using a development-only default");
                "change-me-in-production".to_string()
            }
        };

        let session_transport = match env::var("SESSION_TRANSPORT") {
            Ok(raw) => match raw.as_str() {
                "bearer" => SessionTransport::Bearer,
                "cookie" => SessionTransport::Cookie,
                other => {
                    return Err(ConfigError::Invalid {
                        var: "SESSION_TRANSPORT",
                        reason: format!("unknown transport '{other}'"),
                    });
                }
            },
            Err(_) => SessionTransport::Bearer,
        };

        let database = env::var("DATABASE_URL").ok().map(|url| {
            Ok(DatabaseConfig {
                url,
                max_connections: parse_var("DB_MAX_CONNECTIONS", 100)?,
                min_connections: parse_var("DB_MIN_CONNECTIONS", 10)?,
            })
        });
        let database = database.transpose()?;

        let email = env::var("RESEND_API_KEY").ok().map(|api_key| EmailConfig {
            api_key,
            from_address: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "onboarding@quill.dev".to_string()),
        });

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            environment,
            frontend_base_url: env::var("FRONTEND_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            session_transport,
            session_ttl_seconds: parse_var("SESSION_TTL_SECONDS", 24 * 3600)?,
            verification_ttl_seconds: parse_var("VERIFICATION_TTL_SECONDS", 30 * 60)?,
            jwt: JwtConfig {
                secret,
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "quill-api".to_string()),
            },
            database,
            email,
        })
    }
}

/// Parse an optional env var, failing loudly on a present-but-invalid value.
fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
