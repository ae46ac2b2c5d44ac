//! Canonical sales transaction record

use serde::{Deserialize, Serialize};

/// One row of the sales dataset
///
/// Records are immutable once loaded: no query stage ever mutates them.
/// The serialized field names match the dataset columns exactly, so the same
/// shape is used on the wire, in the MySQL `sales` table and in MongoDB documents.
///
/// Missing textual fields deserialize as empty strings and missing numeric
/// fields as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,

    /// Zero-padded ISO date (`YYYY-MM-DD`), compared as a string
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "CustomerID")]
    pub customer_id: String,

    #[serde(rename = "CustomerName")]
    pub customer_name: String,

    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,

    #[serde(rename = "Gender")]
    pub gender: String,

    #[serde(rename = "Age")]
    pub age: u32,

    #[serde(rename = "CustomerRegion")]
    pub customer_region: String,

    #[serde(rename = "CustomerType")]
    pub customer_type: String,

    #[serde(rename = "ProductID")]
    pub product_id: String,

    #[serde(rename = "ProductName")]
    pub product_name: String,

    #[serde(rename = "Brand")]
    pub brand: String,

    #[serde(rename = "ProductCategory")]
    pub product_category: String,

    /// Comma-separated labels, see [`Transaction::tags`]
    #[serde(rename = "Tags")]
    pub tags: String,

    #[serde(rename = "Quantity")]
    pub quantity: u32,

    #[serde(rename = "PricePerUnit")]
    pub price_per_unit: f64,

    #[serde(rename = "DiscountPercentage")]
    pub discount_percentage: f64,

    #[serde(rename = "TotalAmount")]
    pub total_amount: f64,

    #[serde(rename = "FinalAmount")]
    pub final_amount: f64,

    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,

    #[serde(rename = "OrderStatus")]
    pub order_status: String,

    #[serde(rename = "DeliveryType")]
    pub delivery_type: String,

    #[serde(rename = "StoreID")]
    pub store_id: String,

    #[serde(rename = "StoreLocation")]
    pub store_location: String,

    #[serde(rename = "SalespersonID")]
    pub salesperson_id: String,

    #[serde(rename = "EmployeeName")]
    pub employee_name: String,
}

impl Transaction {
    /// Individual tags, trimmed, empty entries skipped
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        split_tags(&self.tags)
    }

    /// Whether any individual tag equals `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().any(|t| t == tag)
    }

    /// `TotalAmount - FinalAmount`
    ///
    /// Not clamped: rows where the final amount exceeds the total yield a
    /// negative discount.
    pub fn discount(&self) -> f64 {
        self.total_amount - self.final_amount
    }
}

/// Split a raw `Tags` value into trimmed, non-empty tags
pub fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Normalized tag list joined by `,` with no surrounding whitespace
///
/// This is the form stored in the MySQL `TagSet` column so that
/// `FIND_IN_SET` performs exact per-tag matching.
pub fn normalized_tag_set(raw: &str) -> String {
    split_tags(raw).collect::<Vec<_>>().join(",")
}
