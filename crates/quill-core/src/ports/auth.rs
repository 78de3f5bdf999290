//! Authentication ports.

use uuid::Uuid;

/// Claims recovered from a verified token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

/// Token service - issues and verifies signed, expiring tokens.
///
/// The TTL is a parameter because callers need different lifetimes: email
/// verification links are short-lived, signin sessions longer. Tokens are
/// stateless - there is no revocation list, so a compromised token stays
/// valid until its expiry.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for `user_id` expiring `ttl_seconds` from now.
    fn issue(&self, user_id: Uuid, ttl_seconds: u64) -> Result<String, AuthError>;

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Both checks run on every call: an unexpired-but-unsigned token and a
    /// signed-but-expired token are equally invalid.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password into a salted, algorithm-tagged record.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash record.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authentication token")]
    MissingAuth,

    #[error("Unknown user")]
    UnknownUser,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
