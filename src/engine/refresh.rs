use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::board::build_board;
use crate::error::AppError;
use crate::models::board::DriverBoard;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRequest {
    Driver(Uuid),
    All,
}

pub async fn run_refresh_engine(
    state: Arc<AppState>,
    mut refresh_rx: mpsc::Receiver<RefreshRequest>,
    every: Duration,
) {
    info!(interval_secs = every.as_secs(), "refresh engine started");

    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let (request, trigger) = tokio::select! {
            _ = ticker.tick() => (RefreshRequest::All, "periodic"),
            received = refresh_rx.recv() => match received {
                Some(request) => (request, "on_demand"),
                None => break,
            },
        };

        let start = Instant::now();
        match refresh(&state, request) {
            Ok(published) => {
                debug!(boards = published, trigger, "boards refreshed");
            }
            Err(err) => {
                warn!(error = %err, trigger, "board refresh failed");
            }
        }

        state
            .metrics
            .board_refresh_latency_seconds
            .with_label_values(&[trigger])
            .observe(start.elapsed().as_secs_f64());
        state
            .metrics
            .board_refreshes_total
            .with_label_values(&[trigger])
            .inc();
    }

    warn!("refresh engine stopped: queue channel closed");
}

pub fn refresh(state: &AppState, request: RefreshRequest) -> Result<usize, AppError> {
    let driver_ids: Vec<Uuid> = match request {
        RefreshRequest::Driver(id) => vec![id],
        RefreshRequest::All => state.drivers.iter().map(|entry| *entry.key()).collect(),
    };

    let mut published = 0;
    for driver_id in driver_ids {
        let board = board_for(state, driver_id)?;
        let _ = state.board_events_tx.send(board);
        published += 1;
    }

    let active = state
        .orders
        .iter()
        .filter(|entry| entry.value().driver_id.is_some() && !entry.value().status.is_terminal())
        .count();
    state.metrics.active_orders.set(active as i64);

    Ok(published)
}

pub fn board_for(state: &AppState, driver_id: Uuid) -> Result<DriverBoard, AppError> {
    let driver = state
        .drivers
        .get(&driver_id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("driver {} not found", driver_id)))?;

    let board = build_board(&driver, state.orders_for(driver_id), state.clock.now());

    state
        .metrics
        .critical_orders
        .with_label_values(&[&driver_id.to_string()])
        .set(board.counts.critical as i64);

    Ok(board)
}
