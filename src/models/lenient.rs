use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_datetime))
}

pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_date))
}

pub fn time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_time))
}

pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    // Naive timestamps from the store are UTC.
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

// `14:00-16:00` keeps the start of the slot.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let start = raw.trim().split(['-', ' ']).next()?.trim();
    NaiveTime::parse_from_str(start, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(start, "%H:%M"))
        .ok()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    use super::{parse_date, parse_datetime, parse_time};

    #[test]
    fn slot_label_keeps_start_of_slot() {
        assert_eq!(parse_time("14:00-16:00"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_time("09:30:15"), NaiveTime::from_hms_opt(9, 30, 15));
        assert_eq!(parse_time("soon"), None);
        assert_eq!(parse_time(""), None);
    }

    #[test]
    fn date_accepts_timestamp_prefix() {
        let expected = NaiveDate::from_ymd_opt(2026, 7, 14);
        assert_eq!(parse_date("2026-07-14"), expected);
        assert_eq!(parse_date("2026-07-14T00:00:00Z"), expected);
        assert_eq!(parse_date("14/07/2026"), None);
    }

    #[test]
    fn naive_datetime_is_read_as_utc() {
        let expected = Utc.with_ymd_and_hms(2026, 7, 14, 9, 0, 0).single();
        assert_eq!(parse_datetime("2026-07-14T09:00:00Z"), expected);
        assert_eq!(parse_datetime("2026-07-14T11:00:00+02:00"), expected);
        assert_eq!(parse_datetime("2026-07-14 09:00:00"), expected);
        assert_eq!(parse_datetime("yesterday"), None);
    }
}
