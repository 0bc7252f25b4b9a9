//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{domain::ConnectionId, ui::state::AppState};

use super::protocol::{ProtocolHandler, notify_departure};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains this connection's outbound channel into the socket.
///
/// The channel is fed by the `MessagePusher`, so broadcasts keep flowing while
/// the receive loop is suspended on a gateway call.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    match state
        .connect_session_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        Ok(_) => tracing::info!("Connection '{}' opened", connection_id),
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    }

    let (sender, mut receiver) = socket.split();
    let handler = ProtocolHandler::new(state.clone(), connection_id.clone());

    // Commands are handled sequentially, in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", handler.connection_id(), e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => handler.handle_text(text.as_str()).await,
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", handler.connection_id());
                    break;
                }
                Message::Binary(_) => {
                    tracing::debug!(
                        "Ignoring binary frame from '{}'",
                        handler.connection_id()
                    );
                }
                // Ping/pong is answered by axum
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_session_usecase
        .execute(&connection_id)
        .await
    {
        Some(departure) => notify_departure(&state, departure).await,
        None => tracing::debug!("Connection '{}' left without a room", connection_id),
    }
    tracing::info!("Connection '{}' closed", connection_id);
}
