//! SeaORM entities and their domain conversions.

pub mod follow;
pub mod post;
pub mod user;
