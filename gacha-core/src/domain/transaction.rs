//! Transaction domain model
//!
//! Transactions are read-only and never persisted: they are received from the
//! payment service, formatted into display lines, and discarded.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Display format for dates, matching the en-US locale layout
pub const LOCAL_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Text shown for a date the client cannot interpret
pub const INVALID_DATE: &str = "Invalid Date";

/// Text shown for a field the payment service left out
pub const MISSING_FIELD: &str = "undefined";

/// A currency transaction as returned by `GET /viewTrans`
///
/// Fields other than the date are kept as display text: whatever the
/// service sent (`null` included) is echoed, so one odd row never fails the
/// whole listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(default = "missing_field", deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(default = "missing_field", deserialize_with = "deserialize_text")]
    pub payer_us: String,
    #[serde(default = "missing_field", deserialize_with = "deserialize_text")]
    pub receiver_us: String,
    #[serde(default = "missing_field", deserialize_with = "deserialize_text")]
    pub amount: String,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: TransactionDate,
}

/// A transaction timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TransactionDate {
    /// A point in time (offset given, date-only, or epoch millis)
    Instant(DateTime<Utc>),
    /// Wall-clock time without an offset, read as local time
    Local(NaiveDateTime),
    #[default]
    Invalid,
}

impl TransactionDate {
    /// Parse the formats the payment service may send
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Self::Instant(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
            return Self::Instant(dt.with_timezone(&Utc));
        }
        // Flask's default JSON encoding: "Mon, 15 Jan 2024 10:30:00 GMT"
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%a, %d %b %Y %H:%M:%S GMT") {
            return Self::Instant(dt.and_utc());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Self::Local(dt);
            }
        }
        // Date-only strings are UTC midnight
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Self::Instant(dt.and_utc());
            }
        }

        Self::Invalid
    }

    /// Milliseconds since the Unix epoch
    pub fn from_millis(ms: i64) -> Self {
        Utc.timestamp_millis_opt(ms)
            .single()
            .map(Self::Instant)
            .unwrap_or(Self::Invalid)
    }

    /// Render in the given time zone using [`LOCAL_DATE_FORMAT`]
    pub fn format_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self {
            Self::Instant(dt) => dt.with_timezone(tz).format(LOCAL_DATE_FORMAT).to_string(),
            Self::Local(naive) => naive.format(LOCAL_DATE_FORMAT).to_string(),
            Self::Invalid => INVALID_DATE.to_string(),
        }
    }
}

impl Transaction {
    /// One display line: id, payer, receiver, amount, and date in `tz`
    pub fn display_line<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!(
            "ID: {}, Payer: {}, Receiver: {}, Amount: {}, Date: {}",
            self.id,
            self.payer_us,
            self.receiver_us,
            self.amount,
            self.date.format_in(tz)
        )
    }
}

/// Format transactions one per line, in the order received
pub fn format_transactions<Tz: TimeZone>(transactions: &[Transaction], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    transactions
        .iter()
        .map(|t| t.display_line(tz))
        .collect::<Vec<_>>()
        .join("\n")
}

fn missing_field() -> String {
    MISSING_FIELD.to_string()
}

/// Display text for any JSON value
///
/// Strings are verbatim, numbers print without a trailing `.0`, and
/// everything else prints as JSON (`null`, `true`, ...).
fn json_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => {
            let text = n.to_string();
            text.parse::<Decimal>()
                .map(|d| d.normalize().to_string())
                .unwrap_or(text)
        }
        other => other.to_string(),
    }
}

/// Deserialize any JSON value into its display text; never fails on content
fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    Ok(json_text(&value))
}

/// Deserialize amount that can be number or string
pub(crate) fn deserialize_amount<'de, D>(
    deserializer: D,
) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    let text = match value {
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s,
        _ => return Err(D::Error::custom("expected number or string for amount")),
    };
    // serde_json prints large floats in exponent form
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| D::Error::custom(format!("invalid decimal: {}", e)))
}

/// Deserialize a date string or epoch milliseconds; never fails on content
fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<TransactionDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(s) => TransactionDate::parse(&s),
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(TransactionDate::from_millis)
            .unwrap_or(TransactionDate::Invalid),
        _ => TransactionDate::Invalid,
    })
}
