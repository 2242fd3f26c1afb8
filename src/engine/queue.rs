use tracing::warn;
use uuid::Uuid;

use crate::engine::refresh::RefreshRequest;
use crate::error::AppError;
use crate::state::AppState;

pub async fn request_refresh(state: &AppState, driver_id: Uuid) -> Result<(), AppError> {
    state
        .refresh_tx
        .send(RefreshRequest::Driver(driver_id))
        .await
        .map_err(|err| AppError::Internal(format!("refresh queue send failed: {err}")))
}

pub async fn schedule_refresh(state: &AppState, driver_ids: &[Option<Uuid>]) {
    let mut seen: Vec<Uuid> = Vec::with_capacity(driver_ids.len());
    for driver_id in driver_ids.iter().flatten() {
        if seen.contains(driver_id) {
            continue;
        }
        seen.push(*driver_id);

        if let Err(err) = request_refresh(state, *driver_id).await {
            warn!(driver_id = %driver_id, error = %err, "failed to schedule board refresh");
        }
    }
}
