//! Macro-generated test suite for `TransactionStore` contract validation.
//!
//! The `transaction_store_tests!` macro generates a test module that checks a
//! store seeded with [`sample_transactions`](super::sample_transactions)
//! against the in-memory pipeline, query by query: same records, same order,
//! same pagination, same totals.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use sales::storage::InMemoryTransactionStore;
//!
//! transaction_store_tests!(InMemoryTransactionStore::new(sample_transactions()));
//! ```
//!
//! # Generated Tests
//!
//! ## Pipeline
//! - `test_default_query`: date desc, first page of 10
//! - `test_every_sort_key_and_order`: all keys × both orders, full page
//! - `test_unknown_sort_key_keeps_ingestion_order`
//! - `test_customer_name_ties_keep_ingestion_order`
//! - `test_north_by_quantity_desc`: region filter + sort + page
//!
//! ## Search / Filter
//! - `test_search_name_case_insensitive`, `test_search_phone`,
//!   `test_search_blank_is_ignored`, `test_search_metacharacters_are_literal`
//! - `test_tag_exact_membership`, `test_tag_partial_never_matches`
//! - `test_age_range`, `test_date_range`, `test_dimensions_are_anded`
//! - `test_trailing_spaces_are_significant`, `test_no_match`
//!
//! ## Pagination
//! - `test_last_partial_page`, `test_page_past_end`, `test_degenerate_pages`
//!
//! ## Aggregates
//! - `test_summary_covers_all_matches`, `test_filter_options`
//!
//! ## Concurrency
//! - `test_concurrent_queries`: parallel reads from spawned tasks

/// Generate a full `TransactionStore` conformance test suite.
///
/// `$factory` must be an expression (it may contain `.await`) that evaluates
/// to a store seeded with exactly `sample_transactions()`, in order. It is
/// re-evaluated for each test. The store must also be `Clone + 'static`.
#[macro_export]
macro_rules! transaction_store_tests {
    ($factory:expr) => {
        mod transaction_store_contract_tests {
            use super::*;
            use sales::core::options::compute_filter_options;
            use sales::core::{
                FacetPolicy, FilterSet, PageSpec, QueryParams, SalesQuery, SortKey, SortOrder,
                SortSpec, TransactionStore,
            };
            use std::sync::Arc;

            fn strings(values: &[&str]) -> Vec<String> {
                values.iter().map(|v| v.to_string()).collect()
            }

            fn with_filters(filters: FilterSet) -> SalesQuery {
                SalesQuery {
                    filters,
                    page: PageSpec::new(1, 20),
                    ..Default::default()
                }
            }

            fn with_search(search: &str) -> SalesQuery {
                SalesQuery {
                    search: Some(search.to_string()),
                    page: PageSpec::new(1, 20),
                    ..Default::default()
                }
            }

            async fn check(query: &SalesQuery) -> sales::core::SalesPage {
                let store = $factory;
                let page = store.query(query).await.unwrap();
                assert_same_page(&page, &reference_page(query));
                page
            }

            // ==================================================================
            // Pipeline order
            // ==================================================================

            #[tokio::test]
            async fn test_default_query() {
                let page = check(&SalesQuery::default()).await;
                assert_eq!(page.data.len(), 10);
                assert_eq!(page.pagination.total_items, 20);
                assert_eq!(page.pagination.total_pages, 2);
                assert_eq!(page.data[0].transaction_id, "T017");
            }

            #[tokio::test]
            async fn test_every_sort_key_and_order() {
                for key in [SortKey::Date, SortKey::Quantity, SortKey::CustomerName] {
                    for order in [SortOrder::Asc, SortOrder::Desc] {
                        let query = SalesQuery {
                            sort: SortSpec::new(Some(key), order),
                            page: PageSpec::new(1, 20),
                            ..Default::default()
                        };
                        check(&query).await;
                    }
                }
            }

            #[tokio::test]
            async fn test_unknown_sort_key_keeps_ingestion_order() {
                let query = SalesQuery {
                    sort: SortSpec::parse("price", "desc"),
                    page: PageSpec::new(1, 20),
                    ..Default::default()
                };
                let page = check(&query).await;
                let expected: Vec<String> = (1..=20).map(|i| format!("T{:03}", i)).collect();
                assert_eq!(ids(&page), expected);
            }

            #[tokio::test]
            async fn test_customer_name_ties_keep_ingestion_order() {
                let query = SalesQuery {
                    sort: SortSpec::new(Some(SortKey::CustomerName), SortOrder::Desc),
                    page: PageSpec::new(1, 12),
                    ..Default::default()
                };
                let page = check(&query).await;
                assert_eq!(
                    ids(&page),
                    vec![
                        "T008", "T006", "T019", "T014", "T015", "T004", "T003", "T018", "T001",
                        "T010", "T005", "T009"
                    ]
                );
            }

            #[tokio::test]
            async fn test_north_by_quantity_desc() {
                let query = QueryParams::from_pairs(vec![
                    ("regions".to_string(), "North".to_string()),
                    ("sortBy".to_string(), "quantity".to_string()),
                    ("sortOrder".to_string(), "desc".to_string()),
                    ("page".to_string(), "1".to_string()),
                    ("pageSize".to_string(), "5".to_string()),
                ])
                .into_query();

                let page = check(&query).await;
                assert_eq!(ids(&page), vec!["T008", "T011", "T016", "T001", "T005"]);
                assert_eq!(page.pagination.total_items, 6);
                assert_eq!(page.pagination.total_pages, 2);
                assert!(page.pagination.has_next_page);
                assert!(!page.pagination.has_previous_page);
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_name_case_insensitive() {
                let page = check(&with_search("  NEHA ")).await;
                assert_eq!(ids(&page), vec!["T005", "T014", "T001", "T010"]);
            }

            #[tokio::test]
            async fn test_search_phone() {
                let page = check(&with_search("98765")).await;
                assert_eq!(ids(&page), vec!["T001", "T010"]);
            }

            #[tokio::test]
            async fn test_search_blank_is_ignored() {
                let page = check(&with_search("   ")).await;
                assert_eq!(page.pagination.total_items, 20);
            }

            #[tokio::test]
            async fn test_search_metacharacters_are_literal() {
                for needle in ["%", "_", ".*", "a.a", "\\"] {
                    let page = check(&with_search(needle)).await;
                    assert_eq!(page.pagination.total_items, 0, "needle {:?}", needle);
                }
            }

            // ==================================================================
            // Filters
            // ==================================================================

            #[tokio::test]
            async fn test_tag_exact_membership() {
                let page = check(&with_filters(FilterSet {
                    tags: strings(&["eco"]),
                    ..Default::default()
                }))
                .await;
                assert_eq!(ids(&page), vec!["T014", "T007", "T016", "T001"]);
            }

            #[tokio::test]
            async fn test_tag_partial_never_matches() {
                for tag in ["ec", "organic,eco", "gadget premium"] {
                    let page = check(&with_filters(FilterSet {
                        tags: strings(&[tag]),
                        ..Default::default()
                    }))
                    .await;
                    assert_eq!(page.pagination.total_items, 0, "tag {:?}", tag);
                }
            }

            #[tokio::test]
            async fn test_age_range() {
                let page = check(&with_filters(FilterSet {
                    min_age: Some(25),
                    max_age: Some(40),
                    ..Default::default()
                }))
                .await;
                assert_eq!(page.pagination.total_items, 10);
                assert!(page.data.iter().all(|t| (25..=40).contains(&t.age)));
            }

            #[tokio::test]
            async fn test_date_range() {
                let page = check(&with_filters(FilterSet {
                    start_date: Some("2023-02-01".to_string()),
                    end_date: Some("2023-03-15".to_string()),
                    ..Default::default()
                }))
                .await;
                assert_eq!(page.pagination.total_items, 8);
            }

            #[tokio::test]
            async fn test_dimensions_are_anded() {
                let page = check(&with_filters(FilterSet {
                    regions: strings(&["North", "South"]),
                    genders: strings(&["Female"]),
                    categories: strings(&["Clothing", "Beauty", "Sports"]),
                    payment_methods: strings(&["UPI", "Cash"]),
                    order_status: strings(&["Completed", "Pending", "Returned"]),
                    ..Default::default()
                }))
                .await;
                assert_eq!(
                    ids(&page),
                    vec!["T018", "T012", "T007", "T016", "T001"]
                );
            }

            #[tokio::test]
            async fn test_trailing_spaces_are_significant() {
                let page = check(&with_filters(FilterSet {
                    regions: strings(&["North "]),
                    ..Default::default()
                }))
                .await;
                assert_eq!(page.pagination.total_items, 0);

                let page = check(&with_filters(FilterSet {
                    start_date: Some("2023-01-05 ".to_string()),
                    end_date: Some("2023-01-05 ".to_string()),
                    ..Default::default()
                }))
                .await;
                assert_eq!(page.pagination.total_items, 0);

                let page = check(&with_filters(FilterSet {
                    start_date: Some("2023-01-05".to_string()),
                    end_date: Some("2023-01-05 ".to_string()),
                    ..Default::default()
                }))
                .await;
                assert_eq!(ids(&page), vec!["T001", "T002", "T010"]);
            }

            #[tokio::test]
            async fn test_no_match() {
                let page = check(&with_filters(FilterSet {
                    regions: strings(&["Nowhere"]),
                    ..Default::default()
                }))
                .await;
                assert!(page.data.is_empty());
                assert_eq!(page.pagination.total_items, 0);
                assert_eq!(page.pagination.total_pages, 0);
                assert!(!page.pagination.has_next_page);
                assert_eq!(page.summary.total_units, 0);
            }

            // ==================================================================
            // Pagination
            // ==================================================================

            #[tokio::test]
            async fn test_last_partial_page() {
                let query = SalesQuery {
                    page: PageSpec::new(3, 7),
                    ..Default::default()
                };
                let page = check(&query).await;
                assert_eq!(page.data.len(), 6);
                assert_eq!(page.pagination.total_pages, 3);
                assert!(!page.pagination.has_next_page);
                assert!(page.pagination.has_previous_page);
            }

            #[tokio::test]
            async fn test_page_past_end() {
                let query = SalesQuery {
                    page: PageSpec::new(9, 10),
                    ..Default::default()
                };
                let page = check(&query).await;
                assert!(page.data.is_empty());
                assert_eq!(page.pagination.total_items, 20);
                assert_eq!(page.pagination.current_page, 9);
            }

            #[tokio::test]
            async fn test_degenerate_pages() {
                for (number, size) in [(0, 10), (-2, 10), (1, 0), (1, -5)] {
                    let query = SalesQuery {
                        page: PageSpec::new(number, size),
                        ..Default::default()
                    };
                    let page = check(&query).await;
                    assert!(page.data.is_empty(), "page {} size {}", number, size);
                    assert_eq!(page.pagination.total_items, 20);
                }
            }

            // ==================================================================
            // Aggregates
            // ==================================================================

            #[tokio::test]
            async fn test_summary_covers_all_matches() {
                let query = SalesQuery {
                    page: PageSpec::new(1, 3),
                    ..Default::default()
                };
                let page = check(&query).await;
                assert_eq!(page.data.len(), 3);
                assert_eq!(page.summary.total_units, 61);
                assert_eq!(page.summary.amount_records, 20);
                assert_eq!(page.summary.discount_records, 12);
            }

            #[tokio::test]
            async fn test_filter_options() {
                let store = $factory;
                let options = store.filter_options().await.unwrap();

                assert_eq!(
                    options,
                    compute_filter_options(&sample_transactions(), FacetPolicy::Full)
                );
                assert_eq!(
                    options.regions,
                    strings(&["Central", "East", "North", "South", "West"])
                );
                assert_eq!(
                    options.tags,
                    strings(&[
                        "casual", "eco", "gadget", "organic", "outdoor", "premium", "skincare"
                    ])
                );
                assert_eq!((options.min_age, options.max_age), (17, 65));
                assert_eq!(options.min_date, "2022-11-18");
                assert_eq!(options.max_date, "2023-05-09");
                assert!(!options.approximate);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_queries() {
                let store = Arc::new($factory);
                let mut handles = Vec::new();

                for number in 1..=4 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        let query = SalesQuery {
                            page: PageSpec::new(number, 5),
                            ..Default::default()
                        };
                        let page = store.query(&query).await.unwrap();
                        (query, page)
                    }));
                }

                for handle in handles {
                    let (query, page) = handle.await.unwrap();
                    assert_same_page(&page, &reference_page(&query));
                }
            }
        }
    };
}
