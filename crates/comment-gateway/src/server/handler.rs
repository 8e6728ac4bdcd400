//! WebSocket connection handler
//!
//! Each connection gets its own receiver on the in-process broadcast fed by
//! the Redis subscriber, and forwards every event payload to the client
//! until either side hangs up.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use super::state::GatewayState;

/// Upgrade to WebSocket and join the comments group
///
/// GET /gateway
pub async fn gateway_handler(State(state): State<GatewayState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let mut events = state.subscriber().subscribe();
    let (mut sink, mut stream) = socket.split();

    debug!("Client joined the comments group");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(message) => {
                    if sink.send(Message::Text(message.payload)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Slow client, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Ping(data))) => {
                    if sink.send(Message::Pong(data)).await.is_err() {
                        break;
                    }
                }
                // The stream is one-way; inbound content is ignored
                Some(Ok(_)) => {}
                Some(Err(_)) => break,
            },
        }
    }

    debug!("Client left the comments group");
}
