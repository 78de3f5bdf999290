//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod email;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use email::{MailError, Mailer};
pub use repository::{FollowRepository, PostRepository, UserRepository};
