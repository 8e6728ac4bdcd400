//! # comment-db
//!
//! PostgreSQL persistence for the comment stream via SQLx: connection pool,
//! row models with `FromRow` derives, entity mappers, and the
//! `CommentRepository` implementation.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::PgCommentRepository;
