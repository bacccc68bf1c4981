use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

use crate::domain::errors::ChartError;

/// Value Object - ticker symbol, trimmed and uppercased
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Result<Self, ChartError> {
        let symbol = raw.trim();
        if symbol.is_empty() {
            return Err(ChartError::Validation("Please enter a stock symbol".to_string()));
        }
        Ok(Self(symbol.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Value Object - bar interval offered by the backend
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, StrumDisplay, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum Timeframe {
    #[strum(serialize = "1m")]
    #[serde(rename = "1m")]
    OneMinute,

    #[strum(serialize = "15m")]
    #[serde(rename = "15m")]
    FifteenMinutes,

    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,

    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    FourHours,

    #[default]
    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    OneDay,

    #[strum(serialize = "1w")]
    #[serde(rename = "1w")]
    OneWeek,

    #[strum(serialize = "1mo")]
    #[serde(rename = "1mo")]
    OneMonth,
}

impl Timeframe {
    /// Path segment used by `/api/candles/{symbol}/{timeframe}`
    pub fn as_path_segment(&self) -> &str {
        self.as_ref()
    }
}

/// Value Object - bar time exactly as the backend sent it.
///
/// The widget takes UNIX seconds, a `YYYY-MM-DD` string or a
/// `{year, month, day}` object. Whatever arrived is handed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandleTime(Value);

impl CandleTime {
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Whole UNIX seconds, if that is what the backend sent
    pub fn as_unix_seconds(&self) -> Option<i64> {
        self.0.as_i64()
    }
}

impl From<Value> for CandleTime {
    fn from(raw: Value) -> Self {
        Self(raw)
    }
}

impl From<i64> for CandleTime {
    fn from(seconds: i64) -> Self {
        Self(Value::from(seconds))
    }
}

impl From<&str> for CandleTime {
    fn from(day: &str) -> Self {
        Self(Value::from(day))
    }
}
