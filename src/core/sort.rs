//! Sort stage

use crate::core::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};

/// Keys the result set can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// String order on `Date`
    Date,
    /// Numeric order on `Quantity`
    Quantity,
    /// Order on the lower-cased `CustomerName`
    CustomerName,
}

impl SortKey {
    /// Parse a request value; unknown keys yield `None` (no reordering)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date" => Some(SortKey::Date),
            "quantity" => Some(SortKey::Quantity),
            "customerName" => Some(SortKey::CustomerName),
            _ => None,
        }
    }

    /// Ascending base comparator
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Quantity => a.quantity.cmp(&b.quantity),
            SortKey::CustomerName => a
                .customer_name
                .to_lowercase()
                .cmp(&b.customer_name.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `"desc"` is descending, anything else ascending
    pub fn parse(value: &str) -> Self {
        if value == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Sort key plus direction
///
/// A `None` key leaves the input order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: Option<SortKey>,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: Some(SortKey::Date),
            order: SortOrder::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(key: Option<SortKey>, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Build from raw request values
    pub fn parse(key: &str, order: &str) -> Self {
        Self::new(SortKey::parse(key), SortOrder::parse(order))
    }
}

/// Sort stage
///
/// The sort is stable: records comparing equal keep their relative input
/// order in both directions, so ties resolve to ingestion order. `desc`
/// reverses the comparator rather than the output.
pub fn sort<'a>(mut records: Vec<&'a Transaction>, spec: &SortSpec) -> Vec<&'a Transaction> {
    let Some(key) = spec.key else {
        return records;
    };

    match (key, spec.order) {
        // lower-case each name once instead of once per comparison
        (SortKey::CustomerName, SortOrder::Asc) => {
            records.sort_by_cached_key(|t| t.customer_name.to_lowercase())
        }
        (SortKey::CustomerName, SortOrder::Desc) => {
            records.sort_by_cached_key(|t| Reverse(t.customer_name.to_lowercase()))
        }
        (_, SortOrder::Asc) => records.sort_by(|a, b| key.compare(a, b)),
        (_, SortOrder::Desc) => records.sort_by(|a, b| key.compare(b, a)),
    }

    records
}
