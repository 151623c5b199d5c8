//! 日期时间工具
//!
//! 数据库中时间统一存为 Unix 秒，接口层接受 RFC 3339 或 `YYYY-MM-DD`。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::errors::{ErpError, Result};

/// 解析日期输入，纯日期视为当天 UTC 零点
pub fn parse_flexible(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|e| {
        ErpError::date_parse(format!("Invalid date '{input}': expected RFC 3339 or YYYY-MM-DD ({e})"))
    })?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ErpError::date_parse(format!("Invalid date '{input}'")))
}

/// Unix 秒转 UTC 时间，越界时回退到纪元
pub fn from_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}

/// serde 反序列化辅助：`DateTime<Utc>`
pub mod flexible {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_flexible(&s).map_err(|e| serde::de::Error::custom(e.message()))
    }
}

/// serde 反序列化辅助：JSON 请求体中的 `Option<DateTime<Utc>>`
///
/// 缺省或 `null` 为 `None`，空字符串按非法日期拒绝。
pub mod flexible_option {
    use super::*;

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| parse_flexible(&s).map_err(|e| serde::de::Error::custom(e.message())))
            .transpose()
    }
}

/// serde 反序列化辅助：查询参数中的 `Option<DateTime<Utc>>`
///
/// 表单里未填写的 `?startDate=` 视为未提供。
pub mod query_option {
    use super::*;

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.trim().is_empty() => parse_flexible(&s)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(e.message())),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_flexible("2023-11-05T09:30:00Z").unwrap();
        assert_eq!(dt.day(), 5);
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 30);

        let dt = parse_flexible("2023-11-05T09:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 7);
    }

    #[test]
    fn test_parse_plain_date_is_midnight_utc() {
        let dt = parse_flexible("2023-11-05").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 11, 5));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_flexible("05/11/2023").is_err());
        assert!(parse_flexible("").is_err());
        assert!(parse_flexible("2023-13-40").is_err());
    }

    #[test]
    fn test_serde_helpers() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(with = "flexible")]
            date: DateTime<Utc>,
            #[serde(default, with = "flexible_option")]
            until: Option<DateTime<Utc>>,
        }

        let body: Body = serde_json::from_str(r#"{"date":"2024-01-02"}"#).unwrap();
        assert_eq!(body.date.day(), 2);
        assert!(body.until.is_none());

        let body: Body =
            serde_json::from_str(r#"{"date":"2024-01-02T10:00:00Z","until":"2024-02-01"}"#).unwrap();
        assert_eq!(body.until.unwrap().month(), 2);

        assert!(serde_json::from_str::<Body>(r#"{"date":"tomorrow"}"#).is_err());

        let body: Body = serde_json::from_str(r#"{"date":"2024-01-02","until":null}"#).unwrap();
        assert!(body.until.is_none());
        assert!(serde_json::from_str::<Body>(r#"{"date":"2024-01-02","until":""}"#).is_err());
    }

    #[test]
    fn test_query_option_treats_blank_as_missing() {
        #[derive(Deserialize)]
        struct Params {
            #[serde(default, with = "query_option")]
            start: Option<DateTime<Utc>>,
        }

        let params: Params = serde_json::from_str(r#"{"start":""}"#).unwrap();
        assert!(params.start.is_none());
        let params: Params = serde_json::from_str(r#"{"start":"2023-11-06"}"#).unwrap();
        assert_eq!(params.start.unwrap().day(), 6);
        assert!(serde_json::from_str::<Params>(r#"{"start":"soon"}"#).is_err());
    }

    #[test]
    fn test_from_timestamp() {
        assert_eq!(from_timestamp(0).timestamp(), 0);
        assert_eq!(from_timestamp(1_700_000_000).timestamp(), 1_700_000_000);
    }
}
