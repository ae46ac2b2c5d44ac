//! MongoDB transaction store using the official MongoDB async driver.
//!
//! Provides [`MongoTransactionStore`], backed by a `sales` collection in a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! sales-rs = { version = "0.1.0", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! Each transaction is one document carrying the dataset fields under their
//! dataset names. [`MongoTransactionStore::insert_many`] adds derived fields
//! that let the database answer queries the same way the in-memory store does:
//!
//! - `_seq`: ingestion sequence, used as the sort tie-break
//! - `_nameLower` / `_phoneLower`: lower-cased search and sort targets
//! - `_tagList`: the individual trimmed tags, for exact tag matching
//!
//! Derived fields are ignored when documents are read back.

use crate::core::filter::search_needle;
use crate::core::options::{FacetAccumulator, FacetPolicy, FilterOptions};
use crate::core::query::{PaginationMeta, SalesQuery};
use crate::core::sort::{SortKey, SortOrder, SortSpec};
use crate::core::store::{SalesPage, TransactionStore};
use crate::core::summary::SalesSummary;
use crate::core::transaction::Transaction;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Collection, Database};

/// Collection holding one document per transaction
pub const SALES_COLLECTION: &str = "sales";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a transaction into a document with its derived fields.
fn transaction_to_document(tx: &Transaction, seq: i64) -> Result<Document> {
    let mut doc = mongodb::bson::to_document(tx)
        .map_err(|e| anyhow!("Failed to convert transaction to BSON: {}", e))?;

    doc.insert("_seq", seq);
    doc.insert("_nameLower", tx.customer_name.to_lowercase());
    doc.insert("_phoneLower", tx.phone_number.to_lowercase());
    doc.insert(
        "_tagList",
        tx.tags().map(|t| Bson::String(t.to_string())).collect::<Vec<_>>(),
    );

    Ok(doc)
}

fn document_to_transaction(doc: Document) -> Result<Transaction> {
    mongodb::bson::from_document(doc)
        .map_err(|e| anyhow!("Failed to deserialize transaction from BSON: {}", e))
}

/// Read a numeric field regardless of its BSON width.
fn number_f64(doc: &Document, key: &str) -> f64 {
    match doc.get(key) {
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => f64::from(*v),
        Some(Bson::Int64(v)) => *v as f64,
        _ => 0.0,
    }
}

fn number_u64(doc: &Document, key: &str) -> u64 {
    match doc.get(key) {
        Some(Bson::Int32(v)) => (*v).max(0) as u64,
        Some(Bson::Int64(v)) => (*v).max(0) as u64,
        Some(Bson::Double(v)) if *v > 0.0 => *v as u64,
        _ => 0,
    }
}

fn strings(doc: &Document, key: &str) -> Vec<String> {
    match doc.get(key) {
        Some(Bson::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Query translation
// ---------------------------------------------------------------------------

/// Translate search and filters into a `find` filter
///
/// Conditions are combined with `$and`; values inside one dimension with `$in`.
pub(crate) fn build_filter(query: &SalesQuery) -> Document {
    let mut conditions: Vec<Document> = Vec::new();

    if let Some(needle) = search_needle(query.search.as_deref()) {
        let pattern = regex::escape(&needle);
        conditions.push(doc! {
            "$or": [
                { "_nameLower": { "$regex": pattern.as_str() } },
                { "_phoneLower": { "$regex": pattern.as_str() } },
            ]
        });
    }

    let filters = &query.filters;
    let in_lists = [
        ("CustomerRegion", &filters.regions),
        ("Gender", &filters.genders),
        ("ProductCategory", &filters.categories),
        ("PaymentMethod", &filters.payment_methods),
        ("OrderStatus", &filters.order_status),
        ("_tagList", &filters.tags),
    ];
    for (field, values) in in_lists {
        if !values.is_empty() {
            conditions.push(doc! { field: { "$in": values.clone() } });
        }
    }

    let mut age = Document::new();
    if let Some(min) = filters.min_age {
        age.insert("$gte", i64::from(min));
    }
    if let Some(max) = filters.max_age {
        age.insert("$lte", i64::from(max));
    }
    if !age.is_empty() {
        conditions.push(doc! { "Age": age });
    }

    let mut date = Document::new();
    if let Some(start) = &filters.start_date {
        date.insert("$gte", start.as_str());
    }
    if let Some(end) = &filters.end_date {
        date.insert("$lte", end.as_str());
    }
    if !date.is_empty() {
        conditions.push(doc! { "Date": date });
    }

    if conditions.is_empty() {
        doc! {}
    } else {
        doc! { "$and": conditions }
    }
}

/// Sort document; `_seq` breaks ties so equal keys keep ingestion order
pub(crate) fn sort_document(spec: &SortSpec) -> Document {
    let Some(key) = spec.key else {
        return doc! { "_seq": 1 };
    };

    let field = match key {
        SortKey::Date => "Date",
        SortKey::Quantity => "Quantity",
        SortKey::CustomerName => "_nameLower",
    };
    let direction = match spec.order {
        SortOrder::Asc => 1,
        SortOrder::Desc => -1,
    };

    let mut sort = Document::new();
    sort.insert(field, direction);
    sort.insert("_seq", 1);
    sort
}

/// `$group` stage computing the match count and summary totals
fn totals_group() -> Document {
    doc! {
        "$group": {
            "_id": Bson::Null,
            "matched": { "$sum": 1 },
            "totalUnits": { "$sum": "$Quantity" },
            "totalAmount": { "$sum": "$TotalAmount" },
            "totalDiscount": { "$sum": { "$subtract": ["$TotalAmount", "$FinalAmount"] } },
            "amountRecords": {
                "$sum": { "$cond": [{ "$gt": ["$TotalAmount", 0] }, 1, 0] }
            },
            "discountRecords": {
                "$sum": {
                    "$cond": [
                        { "$gt": [{ "$subtract": ["$TotalAmount", "$FinalAmount"] }, 0] },
                        1,
                        0
                    ]
                }
            },
        }
    }
}

/// `$group` stage collecting facet values
fn facets_group() -> Document {
    doc! {
        "$group": {
            "_id": Bson::Null,
            "regions": { "$addToSet": "$CustomerRegion" },
            "genders": { "$addToSet": "$Gender" },
            "categories": { "$addToSet": "$ProductCategory" },
            "paymentMethods": { "$addToSet": "$PaymentMethod" },
            "orderStatuses": { "$addToSet": "$OrderStatus" },
            "tagLists": { "$addToSet": "$_tagList" },
            "minAge": { "$min": { "$cond": [{ "$gt": ["$Age", 0] }, "$Age", Bson::Null] } },
            "maxAge": { "$max": { "$cond": [{ "$gt": ["$Age", 0] }, "$Age", Bson::Null] } },
            "minDate": { "$min": { "$cond": [{ "$ne": ["$Date", ""] }, "$Date", Bson::Null] } },
            "maxDate": { "$max": { "$cond": [{ "$ne": ["$Date", ""] }, "$Date", Bson::Null] } },
        }
    }
}

fn facets_from_document(doc: &Document, approximate: bool) -> FilterOptions {
    let mut acc = FacetAccumulator::new();

    for value in strings(doc, "regions") {
        acc.region(&value);
    }
    for value in strings(doc, "genders") {
        acc.gender(&value);
    }
    for value in strings(doc, "categories") {
        acc.category(&value);
    }
    for value in strings(doc, "paymentMethods") {
        acc.payment_method(&value);
    }
    for value in strings(doc, "orderStatuses") {
        acc.order_status(&value);
    }
    if let Some(Bson::Array(lists)) = doc.get("tagLists") {
        for list in lists {
            if let Bson::Array(tags) = list {
                for tag in tags.iter().filter_map(Bson::as_str) {
                    acc.raw_tags(tag);
                }
            }
        }
    }
    for key in ["minAge", "maxAge"] {
        let age = number_u64(doc, key);
        if let Ok(age) = u32::try_from(age) {
            acc.age(age);
        }
    }
    for key in ["minDate", "maxDate"] {
        if let Ok(date) = doc.get_str(key) {
            acc.date(date);
        }
    }

    acc.finish(approximate)
}

// ---------------------------------------------------------------------------
// MongoTransactionStore
// ---------------------------------------------------------------------------

/// Transaction store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use sales::storage::MongoTransactionStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoTransactionStore::new(client.database("sales"), FacetPolicy::Full);
/// store.ensure_indexes().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoTransactionStore {
    database: Database,
    policy: FacetPolicy,
}

impl MongoTransactionStore {
    pub fn new(database: Database, policy: FacetPolicy) -> Self {
        Self { database, policy }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection::<Document>(SALES_COLLECTION)
    }

    /// Create indexes on the sort and filter fields (idempotent).
    pub async fn ensure_indexes(&self) -> Result<()> {
        use mongodb::IndexModel;

        let indexes = vec![
            IndexModel::builder().keys(doc! { "_seq": 1 }).build(),
            IndexModel::builder()
                .keys(doc! { "Date": 1, "_seq": 1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "Quantity": 1, "_seq": 1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "_nameLower": 1, "_seq": 1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "CustomerRegion": 1 })
                .build(),
            IndexModel::builder().keys(doc! { "_tagList": 1 }).build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| anyhow!("Failed to create indexes on sales collection: {}", e))?;

        Ok(())
    }

    /// Append records in the given order.
    ///
    /// Sequence numbers continue after the documents already present.
    pub async fn insert_many(&self, records: &[Transaction]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let start = self
            .collection()
            .count_documents(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to count transactions: {}", e))? as i64;

        let docs = records
            .iter()
            .enumerate()
            .map(|(i, tx)| transaction_to_document(tx, start + i as i64))
            .collect::<Result<Vec<_>>>()?;

        self.collection()
            .insert_many(docs)
            .await
            .map_err(|e| anyhow!("Failed to insert transactions: {}", e))?;

        Ok(())
    }

    async fn totals(&self, filter: &Document) -> Result<(u64, SalesSummary)> {
        let pipeline = vec![doc! { "$match": filter.clone() }, totals_group()];

        let groups: Vec<Document> = self
            .collection()
            .aggregate(pipeline)
            .await
            .map_err(|e| anyhow!("Failed to compute summary: {}", e))?
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to read summary: {}", e))?;

        let Some(group) = groups.first() else {
            return Ok((0, SalesSummary::default()));
        };

        let summary = SalesSummary {
            total_units: number_u64(group, "totalUnits"),
            total_amount: number_f64(group, "totalAmount"),
            total_discount: number_f64(group, "totalDiscount"),
            amount_records: number_u64(group, "amountRecords"),
            discount_records: number_u64(group, "discountRecords"),
        };

        Ok((number_u64(group, "matched"), summary))
    }
}

#[async_trait]
impl TransactionStore for MongoTransactionStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn query(&self, query: &SalesQuery) -> Result<SalesPage> {
        let filter = build_filter(query);
        let (total, summary) = self.totals(&filter).await?;

        let data = match query.page.window() {
            Some((offset, limit)) if offset < total => {
                let docs: Vec<Document> = self
                    .collection()
                    .find(filter)
                    .sort(sort_document(&query.sort))
                    .skip(offset)
                    .limit(i64::try_from(limit).unwrap_or(i64::MAX))
                    .await
                    .map_err(|e| anyhow!("Failed to query transactions: {}", e))?
                    .try_collect()
                    .await
                    .map_err(|e| anyhow!("Failed to read transactions: {}", e))?;

                docs.into_iter()
                    .map(document_to_transaction)
                    .collect::<Result<Vec<_>>>()?
            }
            _ => Vec::new(),
        };

        Ok(SalesPage {
            data,
            pagination: PaginationMeta::new(query.page, total),
            summary,
        })
    }

    async fn filter_options(&self) -> Result<FilterOptions> {
        let mut pipeline = Vec::new();
        let mut approximate = false;

        if let Some(n) = self.policy.limit() {
            let total = self
                .collection()
                .count_documents(doc! {})
                .await
                .map_err(|e| anyhow!("Failed to count transactions: {}", e))?;
            approximate = (n as u64) < total;

            // `$limit` must be positive; an empty sample has no facets
            if n == 0 {
                return Ok(FacetAccumulator::new().finish(approximate));
            }
            pipeline.push(doc! { "$sort": { "_seq": 1 } });
            pipeline.push(doc! { "$limit": i64::try_from(n).unwrap_or(i64::MAX) });
        }
        pipeline.push(facets_group());

        let groups: Vec<Document> = self
            .collection()
            .aggregate(pipeline)
            .await
            .map_err(|e| anyhow!("Failed to aggregate filter options: {}", e))?
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to read filter options: {}", e))?;

        Ok(match groups.first() {
            Some(group) => facets_from_document(group, approximate),
            None => FacetAccumulator::new().finish(approximate),
        })
    }
}
