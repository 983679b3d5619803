//! Small value types that map domain concepts onto the API's wire forms.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point in time as the API expects it, in UTC without an offset.
///
/// Serialized as `YYYY-MM-DD HH:MM:SS`; date-only parameters such as
/// statistics periods use [`Timestamp::format_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, min, sec)
            .map(Self)
    }

    pub fn now() -> Self {
        Self(Utc::now().naive_utc())
    }

    /// Accepts both `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
            .ok()
            .map(Self)
            .or_else(|| NaiveDate::parse_from_str(s, DATE_FORMAT).ok().map(Self::from))
    }

    pub fn format_date(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    pub fn format_full(&self) -> String {
        self.0.format(DATE_TIME_FORMAT).to_string()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_full())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format_full())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// Visibility of a deal, person or organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibleTo {
    /// Owner and followers.
    Owner,
    /// Entire company.
    Entire,
    /// Owner's visibility group.
    OwnerGroup,
    /// Owner's visibility group and its sub-groups.
    OwnerGroupAndSubgroups,
    Other(u8),
}

impl VisibleTo {
    pub fn code(&self) -> u8 {
        match self {
            VisibleTo::Owner => 1,
            VisibleTo::Entire => 3,
            VisibleTo::OwnerGroup => 5,
            VisibleTo::OwnerGroupAndSubgroups => 7,
            VisibleTo::Other(code) => *code,
        }
    }

    pub fn from_code(code: u8) -> Self {
        match code {
            1 => VisibleTo::Owner,
            3 => VisibleTo::Entire,
            5 => VisibleTo::OwnerGroup,
            7 => VisibleTo::OwnerGroupAndSubgroups,
            other => VisibleTo::Other(other),
        }
    }
}

impl Serialize for VisibleTo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for VisibleTo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Responses send "3", requests and some endpoints send 3.
        let code = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<u8>().ok(),
            _ => None,
        };
        code.map(VisibleTo::from_code)
            .ok_or_else(|| de::Error::custom("visible_to must be a small integer"))
    }
}

/// Whether a pipeline is active. Sent as `1` / `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveFlag {
    Active,
    Inactive,
}

impl From<bool> for ActiveFlag {
    fn from(active: bool) -> Self {
        if active {
            ActiveFlag::Active
        } else {
            ActiveFlag::Inactive
        }
    }
}

impl Serialize for ActiveFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*self == ActiveFlag::Active))
    }
}

impl<'de> Deserialize<'de> for ActiveFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_flag(deserializer).map(ActiveFlag::from)
    }
}

/// Whether deal probability is enabled on a pipeline. Sent as `1` / `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealProbability {
    Enabled,
    Disabled,
}

impl From<bool> for DealProbability {
    fn from(enabled: bool) -> Self {
        if enabled {
            DealProbability::Enabled
        } else {
            DealProbability::Disabled
        }
    }
}

impl Serialize for DealProbability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*self == DealProbability::Enabled))
    }
}

impl<'de> Deserialize<'de> for DealProbability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_flag(deserializer).map(DealProbability::from)
    }
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => match s.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid flag: {other}"))),
        },
        other => Err(de::Error::custom(format!("invalid flag: {other}"))),
    }
}

/// A field whose JSON shape the API does not fix: it may be null, a number
/// or a string depending on the record.
///
/// Decoding never fails. Booleans become `Number(0|1)`; arrays and objects
/// are kept as their compact JSON text.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Loose {
    #[default]
    Absent,
    Number(f64),
    Text(String),
}

impl Loose {
    pub fn is_absent(&self) -> bool {
        matches!(self, Loose::Absent)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Loose::Number(n) => Some(*n),
            Loose::Text(s) => s.trim().parse().ok(),
            Loose::Absent => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Loose::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a record id, when it is a non-negative whole number.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            Loose::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as u64),
            Loose::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The value as a timestamp, when it is text in one of the API's formats.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        self.as_str().and_then(Timestamp::parse)
    }
}

impl From<Value> for Loose {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Loose::Absent,
            Value::Bool(b) => Loose::Number(if b { 1.0 } else { 0.0 }),
            Value::Number(n) => n.as_f64().map(Loose::Number).unwrap_or(Loose::Absent),
            Value::String(s) => Loose::Text(s),
            other => Loose::Text(other.to_string()),
        }
    }
}

impl Serialize for Loose {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Loose::Absent => serializer.serialize_none(),
            Loose::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Loose::Number(n) => serializer.serialize_f64(*n),
            Loose::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Loose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Loose::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timestamp_formats() {
        let ts = Timestamp::from_ymd_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(ts.format_date(), "2024-03-09");
        assert_eq!(ts.format_full(), "2024-03-09 14:05:00");
        assert_eq!(serde_json::to_value(ts).unwrap(), json!("2024-03-09 14:05:00"));
    }

    #[test]
    fn timestamp_parses_date_only() {
        let ts: Timestamp = serde_json::from_value(json!("2024-01-31")).unwrap();
        assert_eq!(ts, Timestamp::from_ymd(2024, 1, 31).unwrap());
        assert!(serde_json::from_value::<Timestamp>(json!("31/01/2024")).is_err());
    }

    #[test]
    fn visible_to_accepts_string_and_number() {
        let from_str: VisibleTo = serde_json::from_value(json!("3")).unwrap();
        let from_num: VisibleTo = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(from_str, VisibleTo::Entire);
        assert_eq!(from_num, VisibleTo::Owner);
        assert_eq!(serde_json::to_value(VisibleTo::OwnerGroup).unwrap(), json!(5));
        assert_eq!(VisibleTo::from_code(9), VisibleTo::Other(9));
    }

    #[test]
    fn flags_serialize_as_integers() {
        assert_eq!(serde_json::to_value(ActiveFlag::Active).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(DealProbability::Disabled).unwrap(), json!(0));
        let flag: ActiveFlag = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(flag, ActiveFlag::Active);
        let flag: DealProbability = serde_json::from_value(json!("0")).unwrap();
        assert_eq!(flag, DealProbability::Disabled);
    }

    #[test]
    fn loose_decodes_every_shape() {
        let cases: Vec<(Value, Loose)> = vec![
            (json!(null), Loose::Absent),
            (json!(42), Loose::Number(42.0)),
            (json!("2024-05-01"), Loose::Text("2024-05-01".to_string())),
            (json!(true), Loose::Number(1.0)),
            (json!({"a": 1}), Loose::Text(r#"{"a":1}"#.to_string())),
        ];
        for (raw, expected) in cases {
            let decoded: Loose = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(decoded, expected, "decoding {raw}");
        }
    }

    #[test]
    fn loose_helpers() {
        assert_eq!(Loose::Number(17.0).as_id(), Some(17));
        assert_eq!(Loose::Text("17".to_string()).as_id(), Some(17));
        assert_eq!(Loose::Number(-1.0).as_id(), None);
        assert_eq!(
            Loose::Text("2024-05-01".to_string()).as_timestamp(),
            Timestamp::from_ymd(2024, 5, 1)
        );
        assert_eq!(serde_json::to_value(Loose::Number(17.0)).unwrap(), json!(17));
        assert_eq!(serde_json::to_value(Loose::Absent).unwrap(), json!(null));
    }

    #[test]
    fn missing_loose_field_is_absent() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default)]
            next_activity_id: Loose,
        }
        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.next_activity_id.is_absent());
    }
}
