use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::order::{Order, OrderStatus};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn allows(self, from: OrderStatus, to: OrderStatus) -> bool {
        if from == to {
            return true;
        }

        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => matches!(
                (from, to),
                (OrderStatus::Pending, OrderStatus::Confirmed)
                    | (OrderStatus::Confirmed, OrderStatus::Delivering)
                    | (OrderStatus::Delivering, OrderStatus::Delivered)
                    | (OrderStatus::Pending, OrderStatus::Cancelled)
                    | (OrderStatus::Confirmed, OrderStatus::Cancelled)
                    | (OrderStatus::Delivering, OrderStatus::Cancelled)
            ),
        }
    }
}

pub fn apply_status(
    order: &Order,
    next: OrderStatus,
    policy: TransitionPolicy,
    now: DateTime<Utc>,
) -> Result<Order, AppError> {
    if !policy.allows(order.status, next) {
        return Err(AppError::Conflict(format!(
            "order {} cannot move from {} to {}",
            order.id,
            order.status.as_str(),
            next.as_str()
        )));
    }

    if order.status == next {
        return Ok(order.clone());
    }

    let mut updated = order.clone();
    updated.status = next;
    updated.updated_at = now;

    updated.delivered_at = match next {
        OrderStatus::Delivered => Some(now),
        _ => None,
    };

    Ok(updated)
}
