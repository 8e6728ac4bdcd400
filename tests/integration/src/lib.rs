//! Integration test utilities for the comment server
//!
//! This crate provides helpers for running end-to-end tests against the
//! REST API. Tests require PostgreSQL and Redis; they skip themselves when
//! DATABASE_URL or REDIS_URL is not set.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
