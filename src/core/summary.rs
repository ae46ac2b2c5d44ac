//! Totals over a filtered result set

use crate::core::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Aggregates over every record matching a query (not just the page)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Sum of `Quantity`
    pub total_units: u64,

    /// Sum of `TotalAmount`
    pub total_amount: f64,

    /// Sum of `TotalAmount - FinalAmount` (may be negative)
    pub total_discount: f64,

    /// Records with a positive `TotalAmount`
    pub amount_records: u64,

    /// Records with a positive discount
    pub discount_records: u64,
}

impl SalesSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        records.into_iter().fold(Self::default(), |mut acc, tx| {
            let discount = tx.discount();
            acc.total_units += u64::from(tx.quantity);
            acc.total_amount += tx.total_amount;
            acc.total_discount += discount;
            if tx.total_amount > 0.0 {
                acc.amount_records += 1;
            }
            if discount > 0.0 {
                acc.discount_records += 1;
            }
            acc
        })
    }
}
