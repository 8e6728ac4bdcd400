//! # comment-gateway
//!
//! WebSocket fan-out for the comment stream. Every connected client joins
//! the single comments group; `new_comment` events published through Redis
//! are forwarded verbatim to all of them. The gateway never originates
//! events and ignores inbound client content.

pub mod server;

pub use server::{create_app, create_gateway_state, run, GatewayState};
