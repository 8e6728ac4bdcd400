//! Entity <-> model mappers

mod comment;
