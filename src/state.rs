use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use crate::engine::clock::Clock;
use crate::engine::refresh::RefreshRequest;
use crate::engine::transition::TransitionPolicy;
use crate::models::board::DriverBoard;
use crate::models::driver::Driver;
use crate::models::order::Order;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub drivers: DashMap<Uuid, Driver>,
    pub orders: DashMap<Uuid, Order>,
    pub clock: Arc<dyn Clock>,
    pub transition_policy: TransitionPolicy,
    pub refresh_tx: mpsc::Sender<RefreshRequest>,
    pub board_events_tx: broadcast::Sender<DriverBoard>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        clock: Arc<dyn Clock>,
        transition_policy: TransitionPolicy,
        refresh_queue_size: usize,
        event_buffer_size: usize,
    ) -> (Self, mpsc::Receiver<RefreshRequest>) {
        let (refresh_tx, refresh_rx) = mpsc::channel(refresh_queue_size);
        let (board_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        (
            Self {
                drivers: DashMap::new(),
                orders: DashMap::new(),
                clock,
                transition_policy,
                refresh_tx,
                board_events_tx,
                metrics: Metrics::new(),
            },
            refresh_rx,
        )
    }

    // Map iteration order is arbitrary; the sort downstream is stable.
    pub fn orders_for(&self, driver_id: Uuid) -> Vec<Order> {
        let mut snapshot: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| entry.value().driver_id == Some(driver_id))
            .map(|entry| entry.value().clone())
            .collect();

        snapshot.sort_by_key(|order| (order.created_at.is_none(), order.created_at, order.id));
        snapshot
    }
}
