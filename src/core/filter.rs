//! Search and filter stages
//!
//! Both stages take a view of the record set (a `Vec` of references) and
//! return a narrowed view in the same order. The records themselves are
//! never touched.

use crate::core::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Multi-field filter request
///
/// Every dimension is optional. An empty value list imposes no constraint;
/// present dimensions are combined with AND, values inside one dimension
/// with OR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSet {
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
    pub order_status: Vec<String>,

    /// Inclusive lower bound on `Age`
    pub min_age: Option<u32>,

    /// Inclusive upper bound on `Age`
    pub max_age: Option<u32>,

    /// Inclusive lower bound on `Date` (string comparison)
    pub start_date: Option<String>,

    /// Inclusive upper bound on `Date` (string comparison)
    pub end_date: Option<String>,
}

impl FilterSet {
    /// True when no dimension constrains anything
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// In-memory predicate for a single record
    pub fn matches(&self, tx: &Transaction) -> bool {
        member(&self.regions, &tx.customer_region)
            && member(&self.genders, &tx.gender)
            && member(&self.categories, &tx.product_category)
            && member(&self.payment_methods, &tx.payment_method)
            && member(&self.order_status, &tx.order_status)
            && self.min_age.is_none_or(|min| tx.age >= min)
            && self.max_age.is_none_or(|max| tx.age <= max)
            && (self.tags.is_empty() || self.tags.iter().any(|t| tx.has_tag(t)))
            && self
                .start_date
                .as_deref()
                .is_none_or(|start| tx.date.as_str() >= start)
            && self
                .end_date
                .as_deref()
                .is_none_or(|end| tx.date.as_str() <= end)
    }
}

fn member(accepted: &[String], value: &str) -> bool {
    accepted.is_empty() || accepted.iter().any(|v| v == value)
}

/// Normalize a free-text search query
///
/// Returns `None` when the query is absent or only whitespace, otherwise
/// the trimmed, lower-cased needle every backend matches against.
pub fn search_needle(query: Option<&str>) -> Option<String> {
    let trimmed = query?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Search stage: case-insensitive substring match on name or phone
pub fn search<'a>(records: Vec<&'a Transaction>, query: Option<&str>) -> Vec<&'a Transaction> {
    let Some(needle) = search_needle(query) else {
        return records;
    };

    records
        .into_iter()
        .filter(|tx| {
            tx.customer_name.to_lowercase().contains(&needle)
                || tx.phone_number.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Filter stage
pub fn filter<'a>(records: Vec<&'a Transaction>, filters: &FilterSet) -> Vec<&'a Transaction> {
    if filters.is_empty() {
        return records;
    }

    records.into_iter().filter(|tx| filters.matches(tx)).collect()
}

/// Parse an age bound the way request parameters are interpreted
///
/// Leading whitespace and an optional sign are accepted, followed by the
/// leading run of digits (`"25years"` is 25). Anything without digits, or a
/// negative value, yields `None` so the bound is simply ignored.
pub fn parse_age_bound(raw: &str) -> Option<u32> {
    parse_leading_int(raw).and_then(|n| u32::try_from(n).ok())
}

/// Lenient integer parsing: optional sign then leading digits
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
