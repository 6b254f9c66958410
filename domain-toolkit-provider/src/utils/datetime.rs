//! 日期时间工具
//!
//! - 序列化: `DateTime`<Utc> -> RFC3339 字符串
//! - 反序列化: RFC3339 字符串 或 Unix 时间戳 -> `DateTime`<Utc>
//! - 注册商时间格式 (`YYYY-MM-DD HH:MM:SS`, 按 UTC 处理) 的宽松解析

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// 注册商返回的时间格式
const REGISTRAR_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const REGISTRAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// 序列化 Option<`DateTime`<Utc>> 为 Option<RFC3339 字符串>
#[allow(clippy::ref_option)]
pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// 反序列化：支持 RFC3339 / 注册商格式字符串或 Unix 时间戳（秒）
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionalTimestamp {
        String(String),
        I64(i64),
    }

    match Option::<OptionalTimestamp>::deserialize(deserializer)? {
        Some(OptionalTimestamp::String(s)) => parse_registrar_datetime(&s)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("Invalid timestamp: {s}"))),
        Some(OptionalTimestamp::I64(ts)) => DateTime::from_timestamp(ts, 0)
            .map(Some)
            .ok_or_else(|| Error::custom("Invalid Unix timestamp")),
        None => Ok(None),
    }
}

/// 解析注册商时间字符串，无法识别时返回 `None`
pub fn parse_registrar_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, REGISTRAR_DATETIME_FORMAT) {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, REGISTRAR_DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 距离到期的整天数（已过期为负数）
pub fn days_until(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expires_at - now).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_registrar_format() {
        let dt = parse_registrar_datetime("2026-08-20 17:52:51").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 8, 20, 17, 52, 51).unwrap());
    }

    #[test]
    fn parses_rfc3339() {
        let dt = parse_registrar_datetime("2026-08-20T17:52:51+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 8, 20, 15, 52, 51).unwrap());
    }

    #[test]
    fn parses_bare_date() {
        let dt = parse_registrar_datetime("2027-01-31").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2027, 1, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_registrar_datetime("").is_none());
        assert!(parse_registrar_datetime("next tuesday").is_none());
    }

    #[test]
    fn days_until_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 10, 29, 13, 0, 0).unwrap();
        assert_eq!(days_until(later, now), 10);
        assert_eq!(days_until(now, later), -10);
    }
}
