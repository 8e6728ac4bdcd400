//! Request extractors

mod auth;
mod pagination;
mod validated;

pub use auth::{AuthUser, RemoteIp, USER_ID_HEADER};
pub use pagination::Pagination;
pub use validated::ValidatedJson;
