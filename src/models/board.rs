use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::order::Order;
use crate::models::urgency::{Urgency, UrgencyLevel};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockShortfall {
    pub product: String,
    pub requested: u32,
    pub available: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockCheck {
    pub sufficient: bool,
    pub shortfalls: Vec<StockShortfall>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardEntry {
    pub order: Order,
    pub urgency: Urgency,
    pub stock: StockCheck,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrgencyCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl UrgencyCounts {
    pub fn record(&mut self, level: UrgencyLevel) {
        match level {
            UrgencyLevel::Critical => self.critical += 1,
            UrgencyLevel::High => self.high += 1,
            UrgencyLevel::Medium => self.medium += 1,
            UrgencyLevel::Low => self.low += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverBoard {
    pub driver_id: Uuid,
    pub generated_at: DateTime<FixedOffset>,
    pub entries: Vec<BoardEntry>,
    pub counts: UrgencyCounts,
}
