use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::queue::schedule_refresh;
use crate::engine::stock::consume_stock;
use crate::engine::transition::apply_status;
use crate::error::AppError;
use crate::models::lenient::{parse_date, parse_time};
use crate::models::order::{DeliveryType, Order, OrderItem, OrderStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", patch(update_order_status))
        .route("/orders/:id/driver", patch(assign_driver))
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub delivery_type: DeliveryType,
    pub delivery_date: Option<String>,
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub driver_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Deserialize)]
pub struct AssignDriverRequest {
    pub driver_id: Option<Uuid>,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::BadRequest("customer_name cannot be empty".to_string()));
    }
    if payload
        .items
        .iter()
        .any(|item| item.product.trim().is_empty() || item.quantity == 0)
    {
        return Err(AppError::BadRequest(
            "items need a product and a quantity > 0".to_string(),
        ));
    }
    if let Some(driver_id) = payload.driver_id {
        ensure_driver(&state, driver_id)?;
    }

    let (delivery_date, delivery_time) = match payload.delivery_type {
        DeliveryType::Express => (None, None),
        DeliveryType::Standard => parse_slot(
            payload.delivery_date.as_deref(),
            payload.delivery_time.as_deref(),
        )?,
    };

    let now = state.clock.now().with_timezone(&Utc);
    let order = Order {
        id: Uuid::new_v4(),
        customer_name: payload.customer_name,
        driver_id: payload.driver_id,
        status: OrderStatus::Pending,
        delivery_type: payload.delivery_type,
        created_at: Some(now),
        delivery_date,
        delivery_time,
        items: payload.items,
        updated_at: now,
        delivered_at: None,
    };

    state.orders.insert(order.id, order.clone());
    info!(order_id = %order.id, express = order.is_express(), "order created");

    schedule_refresh(&state, &[order.driver_id]).await;
    Ok(Json(order))
}

async fn list_orders(State(state): State<Arc<AppState>>) -> Json<Vec<Order>> {
    let mut orders: Vec<Order> = state
        .orders
        .iter()
        .map(|entry| entry.value().clone())
        .collect();

    orders.sort_by_key(|order| (order.created_at.is_none(), order.created_at, order.id));
    Json(orders)
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .orders
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

    Ok(Json(order.value().clone()))
}

async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, AppError> {
    let now = state.clock.now().with_timezone(&Utc);

    let (previous, updated) = {
        let mut entry = state
            .orders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

        let updated = match apply_status(entry.value(), payload.status, state.transition_policy, now) {
            Ok(updated) => updated,
            Err(err) => {
                state
                    .metrics
                    .status_transitions_total
                    .with_label_values(&["rejected"])
                    .inc();
                warn!(order_id = %id, error = %err, "status change rejected");
                return Err(err);
            }
        };

        let previous = entry.status;
        if previous != updated.status {
            *entry = updated.clone();
        }
        (previous, updated)
    };

    if previous == updated.status {
        return Ok(Json(updated));
    }

    state
        .metrics
        .status_transitions_total
        .with_label_values(&["applied"])
        .inc();
    info!(
        order_id = %id,
        from = previous.as_str(),
        to = updated.status.as_str(),
        "order status changed"
    );

    if let (OrderStatus::Delivered, Some(driver_id)) = (updated.status, updated.driver_id) {
        if let Some(mut driver) = state.drivers.get_mut(&driver_id) {
            consume_stock(&mut driver.stock, &updated.items);
            driver.updated_at = now;
        }
    }

    schedule_refresh(&state, &[updated.driver_id]).await;
    Ok(Json(updated))
}

async fn assign_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignDriverRequest>,
) -> Result<Json<Order>, AppError> {
    if let Some(driver_id) = payload.driver_id {
        ensure_driver(&state, driver_id)?;
    }

    let (previous_driver, updated) = {
        let mut order = state
            .orders
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

        let previous_driver = order.driver_id;
        order.driver_id = payload.driver_id;
        order.updated_at = state.clock.now().with_timezone(&Utc);
        (previous_driver, order.clone())
    };

    info!(order_id = %id, driver_id = ?updated.driver_id, "order driver changed");

    schedule_refresh(&state, &[previous_driver, updated.driver_id]).await;
    Ok(Json(updated))
}

fn ensure_driver(state: &AppState, driver_id: Uuid) -> Result<(), AppError> {
    if state.drivers.contains_key(&driver_id) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("driver {} does not exist", driver_id)))
    }
}

fn parse_slot(
    date: Option<&str>,
    time: Option<&str>,
) -> Result<(Option<NaiveDate>, Option<NaiveTime>), AppError> {
    let date = date
        .map(|raw| {
            parse_date(raw)
                .ok_or_else(|| AppError::BadRequest(format!("invalid delivery_date: {raw}")))
        })
        .transpose()?;
    let time = time
        .map(|raw| {
            parse_time(raw)
                .ok_or_else(|| AppError::BadRequest(format!("invalid delivery_time: {raw}")))
        })
        .transpose()?;

    match (date, time) {
        (Some(_), None) | (None, Some(_)) => Err(AppError::BadRequest(
            "delivery_date and delivery_time must be given together".to_string(),
        )),
        slot => Ok(slot),
    }
}
