//! Repository implementations

mod comment;
mod error;

pub use comment::PgCommentRepository;
pub use error::{comment_not_found, map_db_error, map_fk_violation};
