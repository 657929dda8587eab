use bson::Bson;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Timestamps are stored either as BSON dates (heart rate, steps) or as
/// naive ISO strings (HRV, SpO2, sleep levels). Both are read as UTC, which is
/// how the store itself converts strings with `$toDate`.
pub fn to_utc(value: &Bson) -> Option<DateTime<Utc>> {
    match value {
        Bson::DateTime(dt) => Some(dt.to_chrono()),
        Bson::String(s) => parse_timestamp(s),
        _ => None,
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// avg/min/max triple used by the grouped daily views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reads_bson_dates_and_strings() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 23, 15, 30).unwrap();

        assert_eq!(to_utc(&Bson::DateTime(bson::DateTime::from_chrono(expected))), Some(expected));
        assert_eq!(to_utc(&Bson::String("2024-03-01T23:15:30.000".into())), Some(expected));
        assert_eq!(to_utc(&Bson::String("2024-03-01T23:15:30".into())), Some(expected));
        assert_eq!(to_utc(&Bson::String("2024-03-01T23:15:30Z".into())), Some(expected));
        assert_eq!(to_utc(&Bson::String("not a time".into())), None);
        assert_eq!(to_utc(&Bson::Null), None);
    }
}
