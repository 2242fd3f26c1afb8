use chrono::{DateTime, Duration, FixedOffset};

use crate::models::order::Order;
use crate::models::urgency::{Urgency, UrgencyLevel};

const EXPRESS_CRITICAL_AFTER_MINUTES: i64 = 45;
const EXPRESS_HIGH_AFTER_MINUTES: i64 = 30;
const STANDARD_HIGH_WITHIN_HOURS: i64 = 2;
const STANDARD_MEDIUM_WITHIN_HOURS: i64 = 6;

pub fn classify(order: &Order, now: DateTime<FixedOffset>) -> Urgency {
    let matched = if order.is_express() {
        classify_express(order, now)
    } else {
        classify_standard(order, now)
    };

    matched.unwrap_or_else(|| Urgency::new(UrgencyLevel::Low, "Normal"))
}

fn classify_express(order: &Order, now: DateTime<FixedOffset>) -> Option<Urgency> {
    let elapsed = now.signed_duration_since(order.created_at?);

    if elapsed > Duration::minutes(EXPRESS_CRITICAL_AFTER_MINUTES) {
        Some(Urgency::new(UrgencyLevel::Critical, "URGENT — délai dépassé !"))
    } else if elapsed > Duration::minutes(EXPRESS_HIGH_AFTER_MINUTES) {
        Some(Urgency::new(
            UrgencyLevel::High,
            "Très urgent — moins de 30min restantes",
        ))
    } else {
        Some(Urgency::new(UrgencyLevel::Medium, "Express — moins de 1H"))
    }
}

fn classify_standard(order: &Order, now: DateTime<FixedOffset>) -> Option<Urgency> {
    // Slots are local to the dispatch zone, which is the offset of `now`.
    let slot = order
        .scheduled_slot()?
        .and_local_timezone(*now.offset())
        .single()?;
    let until = slot.signed_duration_since(now);

    if until < Duration::zero() {
        Some(Urgency::new(
            UrgencyLevel::Critical,
            "RETARD — livraison prévue dépassée",
        ))
    } else if until < Duration::hours(STANDARD_HIGH_WITHIN_HOURS) {
        Some(Urgency::new(UrgencyLevel::High, "Urgent — moins de 2H"))
    } else if until < Duration::hours(STANDARD_MEDIUM_WITHIN_HOURS) {
        Some(Urgency::new(UrgencyLevel::Medium, "Bientôt — moins de 6H"))
    } else {
        None
    }
}
