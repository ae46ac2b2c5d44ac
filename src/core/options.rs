//! Filter-options (facet) aggregation

use crate::core::transaction::{Transaction, split_tags};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How much of the collection facet values are computed from
///
/// The same policy is applied by every store so that facet lists never
/// depend on which backend is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetPolicy {
    /// Every record
    #[default]
    Full,
    /// The first `n` records in ingestion order; results are approximate
    Sample(usize),
}

impl FacetPolicy {
    pub fn from_sample_size(sample_size: Option<usize>) -> Self {
        match sample_size {
            Some(n) => FacetPolicy::Sample(n),
            None => FacetPolicy::Full,
        }
    }

    /// Record limit, if any
    pub fn limit(&self) -> Option<usize> {
        match self {
            FacetPolicy::Full => None,
            FacetPolicy::Sample(n) => Some(*n),
        }
    }
}

/// Values available to populate filter controls
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
    pub order_statuses: Vec<String>,

    /// Smallest positive age, 0 when there is none
    pub min_age: u32,

    /// Largest positive age, 0 when there is none
    pub max_age: u32,

    /// Earliest non-empty date, `""` when there is none
    pub min_date: String,

    /// Latest non-empty date, `""` when there is none
    pub max_date: String,

    /// True when computed from a bounded sample of the collection
    pub approximate: bool,
}

/// Incremental facet builder
///
/// Stores feed it raw values (from records, `DISTINCT` rows or aggregation
/// output) and it produces sorted, de-duplicated, non-empty lists.
#[derive(Debug, Default)]
pub struct FacetAccumulator {
    regions: BTreeSet<String>,
    genders: BTreeSet<String>,
    categories: BTreeSet<String>,
    tags: BTreeSet<String>,
    payment_methods: BTreeSet<String>,
    order_statuses: BTreeSet<String>,
    min_age: Option<u32>,
    max_age: Option<u32>,
    min_date: Option<String>,
    max_date: Option<String>,
}

fn insert_non_empty(set: &mut BTreeSet<String>, value: &str) {
    if !value.is_empty() && !set.contains(value) {
        set.insert(value.to_string());
    }
}

impl FacetAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&mut self, value: &str) {
        insert_non_empty(&mut self.regions, value);
    }

    pub fn gender(&mut self, value: &str) {
        insert_non_empty(&mut self.genders, value);
    }

    pub fn category(&mut self, value: &str) {
        insert_non_empty(&mut self.categories, value);
    }

    pub fn payment_method(&mut self, value: &str) {
        insert_non_empty(&mut self.payment_methods, value);
    }

    pub fn order_status(&mut self, value: &str) {
        insert_non_empty(&mut self.order_statuses, value);
    }

    /// Add every individual tag of a raw comma-separated `Tags` value
    pub fn raw_tags(&mut self, raw: &str) {
        for tag in split_tags(raw) {
            insert_non_empty(&mut self.tags, tag);
        }
    }

    /// Ages of 0 are not counted
    pub fn age(&mut self, age: u32) {
        if age == 0 {
            return;
        }
        self.min_age = Some(self.min_age.map_or(age, |m| m.min(age)));
        self.max_age = Some(self.max_age.map_or(age, |m| m.max(age)));
    }

    /// Empty dates are not counted
    pub fn date(&mut self, date: &str) {
        if date.is_empty() {
            return;
        }
        if self.min_date.as_deref().is_none_or(|m| date < m) {
            self.min_date = Some(date.to_string());
        }
        if self.max_date.as_deref().is_none_or(|m| date > m) {
            self.max_date = Some(date.to_string());
        }
    }

    pub fn record(&mut self, tx: &Transaction) {
        self.region(&tx.customer_region);
        self.gender(&tx.gender);
        self.category(&tx.product_category);
        self.payment_method(&tx.payment_method);
        self.order_status(&tx.order_status);
        self.raw_tags(&tx.tags);
        self.age(tx.age);
        self.date(&tx.date);
    }

    pub fn finish(self, approximate: bool) -> FilterOptions {
        FilterOptions {
            regions: self.regions.into_iter().collect(),
            genders: self.genders.into_iter().collect(),
            categories: self.categories.into_iter().collect(),
            tags: self.tags.into_iter().collect(),
            payment_methods: self.payment_methods.into_iter().collect(),
            order_statuses: self.order_statuses.into_iter().collect(),
            min_age: self.min_age.unwrap_or(0),
            max_age: self.max_age.unwrap_or(0),
            min_date: self.min_date.unwrap_or_default(),
            max_date: self.max_date.unwrap_or_default(),
            approximate,
        }
    }
}

/// Compute filter options over a resident record set
pub fn compute_filter_options(records: &[Transaction], policy: FacetPolicy) -> FilterOptions {
    let (sample, approximate) = match policy.limit() {
        Some(n) if n < records.len() => (&records[..n], true),
        _ => (records, false),
    };

    let mut acc = FacetAccumulator::new();
    for tx in sample {
        acc.record(tx);
    }
    acc.finish(approximate)
}
