use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Urgency {
    pub level: UrgencyLevel,
    pub message: String,
}

impl Urgency {
    pub fn new(level: UrgencyLevel, message: &str) -> Self {
        Self {
            level,
            message: message.to_string(),
        }
    }
}
