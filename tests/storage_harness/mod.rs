//! Shared test harness for transaction store testing
//!
//! Provides a fixed 20-record fixture with deliberate ties (same date, same
//! quantity, same customer name), mixed-case names, an empty date, a zero
//! age and multi-valued tags, plus helpers for comparing pages produced by
//! different stores.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! transaction_store_tests!(InMemoryTransactionStore::new(sample_transactions()));
//! ```

#![allow(dead_code)]

#[macro_use]
mod store_tests;

use sales::core::pipeline;
use sales::core::{FilterOptions, SalesPage, SalesQuery, SalesSummary, Transaction};

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

type Row = (
    &'static str, // TransactionID
    &'static str, // Date
    &'static str, // CustomerName
    &'static str, // PhoneNumber
    &'static str, // Gender
    u32,          // Age
    &'static str, // CustomerRegion
    &'static str, // ProductCategory
    &'static str, // Tags
    u32,          // Quantity
    f64,          // TotalAmount
    f64,          // FinalAmount
    &'static str, // PaymentMethod
    &'static str, // OrderStatus
);

#[rustfmt::skip]
const ROWS: &[Row] = &[
    ("T001", "2023-01-05", "Neha Sharma",  "9876543210", "Female", 25, "North",   "Clothing",    "organic,eco",       3, 300.0,  270.0,  "UPI",         "Completed"),
    ("T002", "2023-01-05", "arjun mehta",  "9123456780", "Male",   40, "South",   "Electronics", "gadget, premium",   1, 1200.0, 1200.0, "Credit Card", "Completed"),
    ("T003", "2023-02-11", "Priya Patel",  "9988776655", "Female", 17, "East",    "Beauty",      "skincare",          5, 500.0,  450.0,  "Cash",        "Pending"),
    ("T004", "2022-12-30", "Rahul Verma",  "9000011111", "Male",   65, "West",    "Electronics", "premium,gadget",    2, 2000.0, 1800.0, "UPI",         "Cancelled"),
    ("T005", "2023-03-01", "neha kapoor",  "8888800000", "Female", 33, "North",   "Beauty",      "",                  3, 150.0,  150.0,  "Debit Card",  "Completed"),
    ("T006", "",           "Vikram Singh", "7777712345", "Male",   0,  "Central", "Clothing",    "casual",            4, 400.0,  380.0,  "Cash",        "Completed"),
    ("T007", "2023-01-20", "Anita Rao",    "9123400000", "Female", 52, "South",   "Clothing",    "eco, casual",       3, 240.0,  240.0,  "UPI",         "Returned"),
    ("T008", "2023-02-11", "Zoya Khan",    "9555512345", "Female", 29, "North",   "Electronics", "gadget",            7, 3500.0, 3150.0, "Credit Card", "Completed"),
    ("T009", "2023-03-15", "Mohan Das",    "9444400001", "Male",   45, "East",    "Clothing",    "organic",           1, 90.0,   90.0,   "Cash",        "Pending"),
    ("T010", "2023-01-05", "Neha Sharma",  "9876500000", "Female", 38, "West",    "Beauty",      "skincare, organic", 2, 220.0,  200.0,  "UPI",         "Completed"),
    ("T011", "2023-04-02", "Karan Johar",  "9222233333", "Male",   27, "North",   "Sports",      "outdoor,premium",   6, 1800.0, 1620.0, "Net Banking", "Completed"),
    ("T012", "2023-04-02", "Deepa Nair",   "9333344444", "Female", 61, "South",   "Sports",      "outdoor",           2, 500.0,  500.0,  "UPI",         "Completed"),
    ("T013", "2022-11-18", "Imran Ali",    "9666677777", "Male",   22, "Central", "Electronics", "gadget",            1, 999.0,  949.0,  "Debit Card",  "Cancelled"),
    ("T014", "2023-02-28", "Sneha Iyer",   "9811122233", "Female", 31, "East",    "Clothing",    "eco",               4, 480.0,  432.0,  "Cash",        "Completed"),
    ("T015", "2023-03-15", "Rohit Shetty", "9700011122", "Male",   50, "West",    "Sports",      "premium",           3, 900.0,  900.0,  "Credit Card", "Returned"),
    ("T016", "2023-01-20", "Kavya Reddy",  "9600022233", "Female", 26, "North",   "Beauty",      "skincare,eco",      5, 600.0,  540.0,  "UPI",         "Pending"),
    ("T017", "2023-05-09", "Aman Gupta",   "9500033344", "Male",   35, "South",   "Electronics", "gadget,premium",    2, 2400.0, 2160.0, "Net Banking", "Completed"),
    ("T018", "2023-05-09", "Pooja Hegde",  "9400044455", "Female", 44, "North",   "Clothing",    "casual, organic",   3, 270.0,  270.0,  "Cash",        "Completed"),
    ("T019", "2023-03-01", "Suresh Babu",  "9300055566", "Male",   58, "East",    "Sports",      "outdoor",           1, 150.0,  135.0,  "UPI",         "Completed"),
    ("T020", "2023-02-11", "Farah Ahmed",  "9200066677", "Female", 37, "West",    "Beauty",      "skincare",          3, 330.0,  330.0,  "Debit Card",  "Pending"),
];

/// The 20 fixture records, in ingestion order
pub fn sample_transactions() -> Vec<Transaction> {
    ROWS.iter()
        .enumerate()
        .map(
            |(
                i,
                &(id, date, name, phone, gender, age, region, category, tags, quantity, total, final_amount, payment, status),
            )| Transaction {
                transaction_id: id.to_string(),
                date: date.to_string(),
                customer_id: format!("C{:03}", i + 1),
                customer_name: name.to_string(),
                phone_number: phone.to_string(),
                gender: gender.to_string(),
                age,
                customer_region: region.to_string(),
                customer_type: if i % 3 == 0 { "Loyal" } else { "New" }.to_string(),
                product_id: format!("P{:03}", i % 7),
                product_name: format!("{} item", category),
                brand: "Acme".to_string(),
                product_category: category.to_string(),
                tags: tags.to_string(),
                quantity,
                price_per_unit: total / f64::from(quantity.max(1)),
                discount_percentage: if total > 0.0 {
                    ((total - final_amount) / total * 100.0).round()
                } else {
                    0.0
                },
                total_amount: total,
                final_amount,
                payment_method: payment.to_string(),
                order_status: status.to_string(),
                delivery_type: if i % 2 == 0 { "Standard" } else { "Express" }.to_string(),
                store_id: format!("S{:02}", i % 4),
                store_location: region.to_string(),
                salesperson_id: format!("E{:02}", i % 5),
                employee_name: "Ravi Kumar".to_string(),
            },
        )
        .collect()
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

/// What the in-memory pipeline answers for `query` over the fixture
pub fn reference_page(query: &SalesQuery) -> SalesPage {
    pipeline::run(&sample_transactions(), query)
}

pub fn ids(page: &SalesPage) -> Vec<&str> {
    page.data.iter().map(|t| t.transaction_id.as_str()).collect()
}

pub fn assert_summary_close(actual: &SalesSummary, expected: &SalesSummary) {
    assert_eq!(actual.total_units, expected.total_units, "total_units");
    assert_eq!(actual.amount_records, expected.amount_records, "amount_records");
    assert_eq!(actual.discount_records, expected.discount_records, "discount_records");
    assert!(
        (actual.total_amount - expected.total_amount).abs() < 1e-6,
        "total_amount: {} vs {}",
        actual.total_amount,
        expected.total_amount
    );
    assert!(
        (actual.total_discount - expected.total_discount).abs() < 1e-6,
        "total_discount: {} vs {}",
        actual.total_discount,
        expected.total_discount
    );
}

/// Same records in the same order, same pagination, same totals
pub fn assert_same_page(actual: &SalesPage, expected: &SalesPage) {
    assert_eq!(ids(actual), ids(expected), "record order differs");
    assert_eq!(actual.data, expected.data, "record contents differ");
    assert_eq!(actual.pagination, expected.pagination, "pagination differs");
    assert_summary_close(&actual.summary, &expected.summary);
}

/// Options computed from a zero-record sample of the (non-empty) fixture
pub fn assert_empty_sample(options: &FilterOptions) {
    assert_eq!(
        options,
        &FilterOptions {
            approximate: true,
            ..Default::default()
        }
    );
}
