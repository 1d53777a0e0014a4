// src/services/date_normalizer.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Every date shape a fixture document is known to carry.
///
/// Deserialization tries the variants top to bottom, so a store-native date
/// wins over a timestamp object, which wins over an RFC 3339 string, and
/// anything unrecognised ends up as `Text` for the generic parser.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Bson(bson::DateTime),
    Timestamp(TimestampParts),
    Instant(DateTime<Utc>),
    EpochMillis(i64),
    Text(String),
}

/// Seconds/nanoseconds pair as written by mobile SDK timestamp objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampParts {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    #[serde(default, alias = "_nanoseconds")]
    pub nanoseconds: u32,
}

impl TimestampParts {
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.seconds, self.nanoseconds).single()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not normalize date '{raw}'")]
pub struct MalformedDate {
    pub raw: String,
}

impl RawDate {
    fn describe(&self) -> String {
        match self {
            RawDate::Bson(dt) => dt.timestamp_millis().to_string(),
            RawDate::Timestamp(ts) => format!("{}s+{}ns", ts.seconds, ts.nanoseconds),
            RawDate::Instant(dt) => dt.to_rfc3339(),
            RawDate::EpochMillis(ms) => ms.to_string(),
            RawDate::Text(s) => s.clone(),
        }
    }
}

impl From<DateTime<Utc>> for RawDate {
    fn from(dt: DateTime<Utc>) -> Self {
        RawDate::Instant(dt)
    }
}

// Responses carry the normalized instant; unparseable text is echoed back as-is.
impl Serialize for RawDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match normalize(self) {
            Ok(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Err(err) => serializer.serialize_str(&err.raw),
        }
    }
}

/// Strict form: converts `raw` to a UTC instant or reports it as malformed.
pub fn normalize(raw: &RawDate) -> Result<DateTime<Utc>, MalformedDate> {
    let parsed = match raw {
        RawDate::Bson(dt) => Utc.timestamp_millis_opt(dt.timestamp_millis()).single(),
        RawDate::Timestamp(ts) => ts.to_instant(),
        RawDate::Instant(dt) => Some(*dt),
        RawDate::EpochMillis(ms) => Utc.timestamp_millis_opt(*ms).single(),
        RawDate::Text(s) => parse_text(s),
    };

    parsed.ok_or_else(|| MalformedDate { raw: raw.describe() })
}

/// Total form: a malformed date becomes `now` and the condition is handed
/// back so a single bad record never aborts a batch.
pub fn normalize_or(raw: &RawDate, now: DateTime<Utc>) -> (DateTime<Utc>, Option<MalformedDate>) {
    match normalize(raw) {
        Ok(dt) => (dt, None),
        Err(err) => {
            tracing::warn!("⚠️ {} - falling back to current time", err);
            (now, Some(err))
        }
    }
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive forms are taken as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }

    s.parse::<i64>()
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn every_shape_normalizes_to_the_same_instant() {
        let expected = at(2026, 3, 14, 15, 0);
        let shapes = vec![
            RawDate::Bson(bson::DateTime::from_millis(expected.timestamp_millis())),
            RawDate::Timestamp(TimestampParts { seconds: expected.timestamp(), nanoseconds: 0 }),
            RawDate::Instant(expected),
            RawDate::EpochMillis(expected.timestamp_millis()),
            RawDate::Text("2026-03-14T15:00:00Z".into()),
            RawDate::Text("2026-03-14T17:00:00+02:00".into()),
            RawDate::Text("Sat, 14 Mar 2026 15:00:00 +0000".into()),
            RawDate::Text("2026-03-14 15:00:00".into()),
            RawDate::Text("2026-03-14 15:00".into()),
            RawDate::Text(expected.timestamp_millis().to_string()),
        ];

        for shape in shapes {
            assert_eq!(normalize(&shape), Ok(expected), "shape {:?}", shape);
        }
    }

    #[test]
    fn date_only_text_is_midnight_utc() {
        let raw = RawDate::Text("2026-03-14".into());
        assert_eq!(normalize(&raw).unwrap(), at(2026, 3, 14, 0, 0));
    }

    #[test]
    fn garbage_text_is_malformed() {
        let raw = RawDate::Text("next saturday".into());
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.raw, "next saturday");
    }

    #[test]
    fn fallback_returns_now_and_flags_the_record() {
        let now = at(2026, 10, 16, 12, 0);
        let (instant, warning) = normalize_or(&RawDate::Text("".into()), now);
        assert_eq!(instant, now);
        assert!(warning.is_some());

        let (instant, warning) = normalize_or(&RawDate::Instant(at(2026, 1, 1, 0, 0)), now);
        assert_eq!(instant, at(2026, 1, 1, 0, 0));
        assert!(warning.is_none());
    }

    #[test]
    fn json_shapes_pick_the_right_variant() {
        let ts: RawDate = serde_json::from_str(r#"{"seconds": 1700000000, "nanoseconds": 5}"#).unwrap();
        assert_eq!(ts, RawDate::Timestamp(TimestampParts { seconds: 1_700_000_000, nanoseconds: 5 }));

        let sdk: RawDate = serde_json::from_str(r#"{"_seconds": 1700000000, "_nanoseconds": 0}"#).unwrap();
        assert!(matches!(sdk, RawDate::Timestamp(_)));

        let iso: RawDate = serde_json::from_str(r#""2026-03-14T15:00:00Z""#).unwrap();
        assert_eq!(iso, RawDate::Instant(at(2026, 3, 14, 15, 0)));

        let millis: RawDate = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(millis, RawDate::EpochMillis(1_700_000_000_000));

        let text: RawDate = serde_json::from_str(r#""14/03/2026""#).unwrap();
        assert_eq!(text, RawDate::Text("14/03/2026".into()));
    }

    #[test]
    fn serializes_as_rfc3339() {
        let raw = RawDate::EpochMillis(at(2026, 3, 14, 15, 0).timestamp_millis());
        let json = serde_json::to_string(&raw).unwrap();
        assert_eq!(json, r#""2026-03-14T15:00:00+00:00""#);
    }
}
