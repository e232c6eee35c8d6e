//! SeaORM entity models.

pub mod blog;
pub mod post;
