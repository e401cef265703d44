//! Upstream report payload, as the report API sends it.
//!
//! Every field is optional. Amounts go through [`Amount`] and ordering fields
//! through [`Lenient`], so a bad value in one row never fails the whole
//! payload.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tally_shared::types::Amount;

/// Body of `GET /reports/{kind}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPayload {
    /// Flat detail rows.
    #[serde(default)]
    pub rows: Vec<PayloadRow>,
    /// Rows nested under a named group (usually a category).
    #[serde(default)]
    pub groups: Vec<PayloadGroup>,
    /// Opening balance per ledger, in upstream order.
    #[serde(default)]
    pub openings: Openings,
    /// Difference-ledger adjustment.
    #[serde(default)]
    pub difference: Option<PayloadDifference>,
    /// Grand totals computed upstream.
    #[serde(default)]
    pub totals: Option<PayloadTotals>,
}

/// One detail row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayloadRow {
    /// Debit amount; `None` when the field is absent.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub debit: Option<Amount>,
    /// Credit amount; `None` when the field is absent.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub credit: Option<Amount>,
    /// Account category / group.
    #[serde(default)]
    pub category: Option<String>,
    /// Ledger (account) name.
    #[serde(default)]
    pub ledger: Option<String>,
    /// Voucher number.
    #[serde(default)]
    pub voucher: Option<String>,
    /// Recording user.
    #[serde(default)]
    pub user: Option<String>,
    /// Posting date.
    #[serde(default)]
    pub date: Lenient<NaiveDate>,
    /// Position within the date.
    #[serde(default)]
    pub sequence: Lenient<i64>,
    /// Display label.
    #[serde(default)]
    pub label: Option<String>,
    /// Free-text narration.
    #[serde(default)]
    pub narration: Option<String>,
    /// Marks the difference-ledger row.
    #[serde(default)]
    pub is_difference: bool,
}

impl PayloadRow {
    /// Debit value, zero when absent or coerced.
    #[must_use]
    pub fn debit(&self) -> Decimal {
        self.debit.map(Amount::value).unwrap_or_default()
    }

    /// Credit value, zero when absent or coerced.
    #[must_use]
    pub fn credit(&self) -> Decimal {
        self.credit.map(Amount::value).unwrap_or_default()
    }

    /// Returns true if the row lacks both amounts, carries a non-numeric
    /// amount, or has an unreadable date or sequence.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        let amounts_bad = match (self.debit, self.credit) {
            (None, None) => true,
            (debit, credit) => {
                debit.is_some_and(Amount::is_coerced) || credit.is_some_and(Amount::is_coerced)
            }
        };
        amounts_bad || self.date.is_malformed() || self.sequence.is_malformed()
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    Amount::deserialize(deserializer).map(Some)
}

/// An optional field that tolerates bad values.
///
/// `null` or absent is [`Lenient::Absent`]; anything that does not parse as
/// `T` is [`Lenient::Malformed`] instead of a decode error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lenient<T> {
    /// Not sent.
    #[default]
    Absent,
    /// Parsed value.
    Valid(T),
    /// Sent but unreadable.
    Malformed,
}

impl<T: Copy> Lenient<T> {
    /// The parsed value, if any.
    #[must_use]
    pub const fn valid(&self) -> Option<T> {
        match self {
            Self::Valid(value) => Some(*value),
            Self::Absent | Self::Malformed => None,
        }
    }
}

impl<T> Lenient<T> {
    /// Returns true if a value was sent but could not be read.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Self::Absent);
        }
        Ok(serde_json::from_value(value).map_or(Self::Malformed, Self::Valid))
    }
}

impl<T: Serialize> Serialize for Lenient<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Valid(value) => value.serialize(serializer),
            Self::Absent | Self::Malformed => serializer.serialize_none(),
        }
    }
}

/// Rows nested under a group name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayloadGroup {
    /// Group name; rows without their own category inherit it.
    pub name: String,
    /// Member rows.
    #[serde(default)]
    pub rows: Vec<PayloadRow>,
}

/// Explicit difference-ledger adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadDifference {
    /// Row label.
    #[serde(default = "default_difference_name")]
    pub name: String,
    /// Debit amount.
    #[serde(default)]
    pub debit: Amount,
    /// Credit amount.
    #[serde(default)]
    pub credit: Amount,
}

fn default_difference_name() -> String {
    "Difference in opening balance".to_string()
}

/// Grand totals as computed upstream.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PayloadTotals {
    /// Total debit.
    #[serde(default)]
    pub debit: Amount,
    /// Total credit.
    #[serde(default)]
    pub credit: Amount,
}

/// Opening balances keyed by ledger.
///
/// Sent as a JSON object; entries keep the order they appear in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Openings(pub Vec<(String, Amount)>);

impl Openings {
    /// Entries in upstream order.
    #[must_use]
    pub fn entries(&self) -> &[(String, Amount)] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Openings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OpeningsVisitor;

        impl<'de> Visitor<'de> for OpeningsVisitor {
            type Value = Openings;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of ledger name to opening balance")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((ledger, amount)) = map.next_entry::<String, Amount>()? {
                    entries.push((ledger, amount));
                }
                Ok(Openings(entries))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Openings::default())
            }
        }

        deserializer.deserialize_any(OpeningsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_empty_payload() {
        let payload: ReportPayload = serde_json::from_value(json!({})).unwrap();
        assert!(payload.rows.is_empty());
        assert!(payload.groups.is_empty());
        assert!(payload.openings.entries().is_empty());
        assert!(payload.difference.is_none());
        assert!(payload.totals.is_none());
    }

    #[test]
    fn test_openings_keep_upstream_order() {
        let payload: ReportPayload = serde_json::from_str(
            r#"{ "openings": { "Petty Cash": 5, "Bank": "1000.50", "Cash": null } }"#,
        )
        .unwrap();

        let ledgers: Vec<&str> = payload
            .openings
            .entries()
            .iter()
            .map(|(ledger, _)| ledger.as_str())
            .collect();
        assert_eq!(ledgers, vec!["Petty Cash", "Bank", "Cash"]);
        assert_eq!(payload.openings.entries()[1].1.value(), dec!(1000.50));
        assert!(payload.openings.entries()[2].1.is_coerced());
    }

    #[test]
    fn test_null_openings() {
        let payload: ReportPayload = serde_json::from_value(json!({ "openings": null })).unwrap();
        assert!(payload.openings.entries().is_empty());
    }

    #[test]
    fn test_row_with_mixed_amount_types() {
        let row: PayloadRow = serde_json::from_value(json!({
            "debit": "250.00",
            "credit": "oops",
            "ledger": "Cash",
            "date": "2024-04-02",
            "sequence": 7
        }))
        .unwrap();

        assert_eq!(row.debit(), dec!(250.00));
        assert_eq!(row.credit(), Decimal::ZERO);
        assert!(row.is_malformed());
        assert_eq!(row.ledger.as_deref(), Some("Cash"));
        assert_eq!(row.date.valid(), NaiveDate::from_ymd_opt(2024, 4, 2));
        assert_eq!(row.sequence.valid(), Some(7));
        assert!(!row.is_difference);
    }

    #[test]
    fn test_one_absent_amount_is_plain_zero() {
        let row: PayloadRow = serde_json::from_value(json!({ "debit": 10 })).unwrap();
        assert!(row.credit.is_none());
        assert_eq!(row.credit(), Decimal::ZERO);
        assert!(!row.is_malformed());
    }

    #[rstest]
    #[case(json!({ "ledger": "Cash" }), true)]
    #[case(json!({ "ledger": "Cash", "debit": 0, "credit": 0 }), false)]
    #[case(json!({ "ledger": "Cash", "debit": null }), true)]
    #[case(json!({ "ledger": "Cash", "credit": 5, "date": "" }), true)]
    #[case(json!({ "ledger": "Cash", "credit": 5, "sequence": "3" }), true)]
    #[case(json!({ "ledger": "Cash", "credit": 5, "date": null }), false)]
    fn test_row_malformed(#[case] value: Value, #[case] expected: bool) {
        let row: PayloadRow = serde_json::from_value(value).unwrap();
        assert_eq!(row.is_malformed(), expected);
    }

    #[test]
    fn test_bad_date_keeps_the_rest_of_the_payload() {
        let payload: ReportPayload = serde_json::from_value(json!({
            "rows": [
                { "ledger": "Cash", "date": "2024-04-02", "debit": 500 },
                { "ledger": "Cash", "date": "", "credit": 100 },
                { "ledger": "Cash", "date": "2024-04-03", "sequence": "x", "credit": 50 }
            ]
        }))
        .unwrap();

        assert_eq!(payload.rows.len(), 3);
        assert_eq!(payload.rows[1].date, Lenient::Malformed);
        assert_eq!(payload.rows[1].credit(), dec!(100));
        assert_eq!(payload.rows[2].date.valid(), NaiveDate::from_ymd_opt(2024, 4, 3));
        assert!(payload.rows[2].sequence.is_malformed());
    }

    #[test]
    fn test_difference_default_name() {
        let diff: PayloadDifference = serde_json::from_value(json!({ "credit": 10 })).unwrap();
        assert_eq!(diff.name, "Difference in opening balance");
        assert_eq!(diff.credit.value(), dec!(10));
    }
}
