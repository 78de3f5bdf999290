//! In-memory repository implementations.
//!
//! Used as the fallback store when no database is configured, and as the
//! store behind handler tests. Data is lost on process restart.

mod follows;
mod posts;
mod users;

pub use follows::MemoryFollowRepository;
pub use posts::MemoryPostRepository;
pub use users::MemoryUserRepository;
