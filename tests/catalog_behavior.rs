//! Behavior-driven tests for browsing the asset and metric catalog
//!
//! These tests drive the catalog through the Glassnode adapter over a
//! scripted transport, checking what a picker would observe.

mod support;

use std::sync::Arc;

use glance_core::{ApiErrorKind, AssetSymbol, CatalogResolver, Glance, Selection};
use support::{api, test_config, ScriptedHttpClient, ASSETS_BODY, METRICS_BODY};

fn symbol(raw: &str) -> AssetSymbol {
    AssetSymbol::parse(raw).expect("valid symbol")
}

fn resolver(client: Arc<ScriptedHttpClient>) -> CatalogResolver {
    CatalogResolver::new(Arc::new(api(client, Some("test-key"))), None)
}

// =============================================================================
// Catalog Journey: Asset List
// =============================================================================

#[tokio::test]
async fn user_sees_assets_sorted_by_symbol_regardless_of_remote_order() {
    // Given: The catalog host lists ETH before BTC
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let catalog = resolver(client);

    // When: The picker loads all assets
    let assets = catalog.get_all_assets().await.expect("assets load");

    // Then: They are ordered BTC, ETH with ids and names intact
    let symbols: Vec<&str> = assets.iter().map(|a| a.symbol.as_str()).collect();
    assert_eq!(symbols, ["BTC", "ETH"]);
    assert_eq!(assets[0].id, "1");
    assert_eq!(assets[0].name, "Bitcoin");
    assert_eq!(assets[1].display_label(), "ETH - Ethereum");
}

#[tokio::test]
async fn asset_list_is_fetched_once_and_shared() {
    // Given: A fresh catalog
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let catalog = resolver(client.clone());

    // When: The asset list is requested twice
    let first = catalog.get_all_assets().await.expect("first load");
    let second = catalog.get_all_assets().await.expect("second load");

    // Then: Only one remote call was made and both results are the same list
    assert_eq!(client.count_matching("/api/metric-assets"), 1);
    assert!(Arc::ptr_eq(&first, &second), "memoized list should be shared");
}

#[tokio::test]
async fn concurrent_first_reads_issue_a_single_request() {
    // Given: Several widgets mount at the same time
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let catalog = resolver(client.clone());

    // When: They all ask for metrics before the first fetch resolves
    let (a, b, c) = tokio::join!(
        catalog.get_all_metrics(),
        catalog.get_all_metrics(),
        catalog.get_all_metrics()
    );

    // Then: One request served all of them
    let (a, b, c) = (a.expect("a"), b.expect("b"), c.expect("c"));
    assert_eq!(client.count_matching("/api/metrics"), 1);
    assert!(Arc::ptr_eq(&a, &b) && Arc::ptr_eq(&b, &c));
}

#[tokio::test]
async fn failed_load_is_not_cached_and_next_read_retries() {
    // Given: The catalog host is briefly unavailable
    let client = Arc::new(
        ScriptedHttpClient::new()
            .route("/api/metric-assets", 503, "")
            .route("/api/metrics", 200, METRICS_BODY),
    );
    let catalog = resolver(client.clone());

    // When: The first load fails
    let error = catalog.get_all_assets().await.expect_err("503 must fail");
    assert_eq!(error.kind(), ApiErrorKind::HttpStatus);

    // And: The host recovers
    client.reroute("/api/metric-assets", 200, ASSETS_BODY);

    // Then: The next read fetches again and succeeds
    let assets = catalog.get_all_assets().await.expect("retry succeeds");
    assert_eq!(assets.len(), 2);
    assert_eq!(client.count_matching("/api/metric-assets"), 2);
}

// =============================================================================
// Catalog Journey: Metric Filtering
// =============================================================================

#[tokio::test]
async fn metrics_supporting_is_exactly_the_membership_filter() {
    // Given: A loaded catalog
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let catalog = resolver(client);
    let all_metrics = catalog.get_all_metrics().await.expect("metrics load");

    for asset in catalog.get_all_assets().await.expect("assets load").iter() {
        // When: The user picks the asset
        let supported = catalog
            .metrics_supporting(&asset.symbol)
            .await
            .expect("filter succeeds");

        // Then: A metric is offered if and only if it lists the symbol
        for metric in all_metrics.iter() {
            assert_eq!(
                supported.contains(metric),
                metric.supported_asset_symbols.contains(&asset.symbol),
                "metric {} vs asset {}",
                metric.id,
                asset.symbol
            );
        }
    }
}

#[tokio::test]
async fn filter_keeps_catalog_order_and_handles_unknown_symbols() {
    // Given: A loaded catalog
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let catalog = resolver(client.clone());

    // When: Filtering for BTC, then for a symbol nobody supports
    let btc = catalog.metrics_supporting(&symbol("BTC")).await.expect("btc");
    let doge = catalog.metrics_supporting(&symbol("DOGE")).await.expect("doge");

    // Then: BTC metrics keep remote order and DOGE gets nothing
    let ids: Vec<&str> = btc.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["10", "20"]);
    assert!(doge.is_empty());

    // And: Filtering reused the memoized metric list
    assert_eq!(client.count_matching("/api/metrics"), 1);
}

#[tokio::test]
async fn symbol_matching_is_case_sensitive_but_lookup_is_not() {
    // Given: A loaded catalog
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let catalog = resolver(client);

    // When: Filtering with a lowercase symbol
    let lowercase = catalog.metrics_supporting(&symbol("btc")).await.expect("filter");

    // Then: Nothing matches the exact join
    assert!(lowercase.is_empty());

    // But: Typed lookup still finds the asset
    let found = catalog.find_asset("btc").await.expect("lookup");
    assert_eq!(found.map(|a| a.id), Some(String::from("1")));
}

// =============================================================================
// Catalog Journey: Selection and Refresh
// =============================================================================

#[tokio::test]
async fn selection_resolves_to_a_titled_metric_path() {
    // Given: A loaded catalog
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let catalog = resolver(client);

    // When: The user picks ETH and "Addresses in Profit"
    let resolved = catalog
        .resolve(&Selection::new(symbol("ETH"), "10"))
        .await
        .expect("pair is supported");

    // Then: The path and title are ready for the series fetch
    assert_eq!(resolved.path().as_str(), "/addresses/profit_count");
    assert_eq!(resolved.title(), "ETH: Addresses in Profit");

    // And: Unsupported pairs are rejected
    let error = catalog
        .resolve(&Selection::new(symbol("ETH"), "20"))
        .await
        .expect_err("hash rate is BTC only");
    assert_eq!(error.kind(), ApiErrorKind::InvalidRequest);
}

#[tokio::test]
async fn defaults_and_suggestions_come_from_the_cached_catalog() {
    // Given: A loaded catalog
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let catalog = resolver(client.clone());

    // When: A widget asks for its initial selection and suggestions
    let asset = catalog.default_asset().await.expect("asset").expect("some");
    let metric = catalog.default_metric().await.expect("metric").expect("some");
    let suggested = catalog.suggested_metrics().await.expect("suggestions");

    // Then: The first sorted asset and first metric are chosen
    assert_eq!(asset.symbol.as_str(), "BTC");
    assert_eq!(metric.id, "10");
    let names: Vec<&str> = suggested.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Addresses in Profit", "Gas Used", "Hash Rate"]);

    // And: Id lookups only return known entries
    let by_id = catalog
        .metrics_by_ids(&[String::from("30"), String::from("99")])
        .await
        .expect("lookup");
    assert_eq!(by_id.len(), 1);
    assert_eq!(client.count_matching("/api/metrics"), 1);
}

#[tokio::test]
async fn explicit_refresh_refetches_the_catalog() {
    // Given: A glance pipeline with a loaded catalog
    let client = Arc::new(ScriptedHttpClient::with_catalog("[]"));
    let glance = Glance::new(Arc::new(api(client.clone(), Some("k"))), &test_config());
    glance.catalog().get_all_assets().await.expect("initial load");

    // When: The host asks for a refresh
    glance.refresh().await.expect("refresh succeeds");

    // Then: Both lists were fetched again
    assert_eq!(client.count_matching("/api/metric-assets"), 2);
    assert_eq!(client.count_matching("/api/metrics"), 1);
    assert!(glance.catalog().get_all_metrics().await.is_ok());
    assert_eq!(client.count_matching("/api/metrics"), 1);
}
