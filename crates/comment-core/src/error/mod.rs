//! Domain error types

mod domain_error;
mod violation;

pub use domain_error::DomainError;
pub use violation::{Violation, Violations};
