use std::env;
use std::time::Duration;

use chrono::FixedOffset;

use crate::engine::transition::TransitionPolicy;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub refresh_queue_size: usize,
    pub event_buffer_size: usize,
    pub refresh_interval: Duration,
    pub utc_offset: FixedOffset,
    pub transition_policy: TransitionPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        let refresh_interval_secs: u64 = parse_or_default("REFRESH_INTERVAL_SECS", 30)?;
        if refresh_interval_secs == 0 {
            return Err(AppError::Internal(
                "invalid REFRESH_INTERVAL_SECS: must be > 0".to_string(),
            ));
        }

        let offset_minutes: i32 = parse_or_default("UTC_OFFSET_MINUTES", 0)?;
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60).ok_or_else(|| {
            AppError::Internal(format!("invalid UTC_OFFSET_MINUTES: {offset_minutes} out of range"))
        })?;

        let transition_policy = if parse_or_default("STRICT_TRANSITIONS", false)? {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Permissive
        };

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            refresh_queue_size: parse_or_default("REFRESH_QUEUE_SIZE", 1024)?,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            refresh_interval: Duration::from_secs(refresh_interval_secs),
            utc_offset,
            transition_policy,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
