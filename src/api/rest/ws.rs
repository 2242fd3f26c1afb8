use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::SinkExt;
use futures::StreamExt;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct BoardFilter {
    pub driver_id: Option<Uuid>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BoardFilter>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, filter.driver_id))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, driver_id: Option<Uuid>) {
    let (mut sender, mut receiver) = socket.split();
    let mut boards = BroadcastStream::new(state.board_events_tx.subscribe());

    info!(driver_id = ?driver_id, "websocket client connected");

    let send_task = tokio::spawn(async move {
        while let Some(next) = boards.next().await {
            let board = match next {
                Ok(board) => board,
                Err(err) => {
                    warn!(error = %err, "websocket client fell behind board events");
                    continue;
                }
            };

            if driver_id.is_some_and(|id| id != board.driver_id) {
                continue;
            }

            let json = match serde_json::to_string(&board) {
                Ok(json) => json,
                Err(err) => {
                    warn!(error = %err, "failed to serialize board for ws");
                    continue;
                }
            };

            if sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(_msg)) = receiver.next().await {}
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    info!(driver_id = ?driver_id, "websocket client disconnected");
}
