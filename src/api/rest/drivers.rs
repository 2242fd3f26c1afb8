use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post, put};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::queue::schedule_refresh;
use crate::engine::refresh::board_for;
use crate::error::AppError;
use crate::models::board::DriverBoard;
use crate::models::driver::{Driver, DriverStatus, Stock};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers", post(create_driver).get(list_drivers))
        .route("/drivers/:id/status", patch(update_driver_status))
        .route("/drivers/:id/stock", put(replace_driver_stock))
        .route("/drivers/:id/board", get(get_driver_board))
}

#[derive(Deserialize)]
pub struct CreateDriverRequest {
    pub name: String,
    #[serde(default)]
    pub stock: Stock,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: DriverStatus,
}

#[derive(Deserialize)]
pub struct ReplaceStockRequest {
    pub stock: Stock,
}

async fn create_driver(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }
    validate_stock(&payload.stock)?;

    let driver = Driver {
        id: Uuid::new_v4(),
        name: payload.name,
        status: DriverStatus::Available,
        stock: payload.stock,
        updated_at: Utc::now(),
    };

    state.drivers.insert(driver.id, driver.clone());
    tracing::info!(driver_id = %driver.id, "driver registered");
    Ok(Json(driver))
}

async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<Driver>> {
    let drivers = state
        .drivers
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(drivers)
}

async fn update_driver_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Driver>, AppError> {
    let mut driver = state
        .drivers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("driver {} not found", id)))?;

    driver.status = payload.status;
    driver.updated_at = Utc::now();

    Ok(Json(driver.clone()))
}

async fn replace_driver_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceStockRequest>,
) -> Result<Json<Driver>, AppError> {
    validate_stock(&payload.stock)?;

    let driver = {
        let mut driver = state
            .drivers
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("driver {} not found", id)))?;

        driver.stock = payload.stock;
        driver.updated_at = Utc::now();
        driver.clone()
    };

    schedule_refresh(&state, &[Some(id)]).await;
    Ok(Json(driver))
}

async fn get_driver_board(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverBoard>, AppError> {
    board_for(&state, id).map(Json)
}

fn validate_stock(stock: &Stock) -> Result<(), AppError> {
    if stock.keys().any(|product| product.trim().is_empty()) {
        return Err(AppError::BadRequest("product name cannot be empty".to_string()));
    }
    Ok(())
}
