//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! database repositories, authentication services, and the email provider
//! client.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM. Without it
//!   only the in-memory repositories are available.

pub mod auth;
pub mod database;
pub mod email;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, LogMailer, ResendMailer};
pub use memory::{MemoryFollowRepository, MemoryPostRepository, MemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresFollowRepository, PostgresPostRepository, PostgresUserRepository};
