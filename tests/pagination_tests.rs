//! Integration tests for paginated reads.
//!
//! These tests run the full stack (config, token manager, REST client,
//! controller and resources) against a mock Lightspeed server.
//!
//! Tests cover:
//! - Walking a multi-page catalog without gaps or duplicates
//! - Refreshing an expired access token exactly once
//! - Retrying throttled pages on the same offset
//! - The item-only recovery from pages missing their collection
//! - Giving up after the retry budget

use std::collections::HashSet;

use lightspeed_api::rest::resources::{
    Category, CategoryListParams, Item, ItemFindParams, ItemListParams, Order, OrderListParams,
};
use lightspeed_api::{
    AccessTokenSource, AccountId, ApiUrl, ClientId, ClientSecret, LightspeedConfig, RefreshToken,
    RestClient, RestError, Session, ThrottlePolicy, TokenManager,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ITEMS: &str = "/API/Account/12345/Item.json";

fn create_config(server: &MockServer, max_retries: u32) -> LightspeedConfig {
    LightspeedConfig::builder()
        .client_id(ClientId::new("client-id").unwrap())
        .client_secret(ClientSecret::new("client-secret").unwrap())
        .refresh_token(RefreshToken::new("store-refresh").unwrap())
        .account_id(AccountId::new("12345").unwrap())
        .api_url(ApiUrl::new(format!("{}/API/Account/", server.uri())).unwrap())
        .token_url(ApiUrl::new(format!("{}/oauth/access_token.php", server.uri())).unwrap())
        .throttle(ThrottlePolicy {
            max_retries,
            ..ThrottlePolicy::default().without_retry_delays()
        })
        .build()
        .unwrap()
}

fn create_client(server: &MockServer, token: &str, max_retries: u32) -> RestClient {
    let config = create_config(server, max_retries);
    let tokens = TokenManager::with_session(config.clone(), Session::new(token.to_string(), None));
    RestClient::with_tokens(&config, tokens).unwrap()
}

/// A page response with plenty of bucket headroom.
fn page(key: &str, count: u64, offset: u64, limit: u64, records: Vec<Value>) -> ResponseTemplate {
    let mut body = json!({
        "@attributes": {
            "count": count.to_string(),
            "offset": offset.to_string(),
            "limit": limit.to_string()
        }
    });
    body[key] = Value::Array(records);

    ResponseTemplate::new(200)
        .insert_header("X-LS-API-Bucket-Level", "4.4/60")
        .insert_header("X-LS-API-Drip-Rate", "1")
        .set_body_json(body)
}

fn items(range: std::ops::Range<u64>) -> Vec<Value> {
    range
        .map(|id| json!({"itemID": id.to_string(), "description": format!("Item {id}")}))
        .collect()
}

fn envelope(code: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(code).set_body_json(json!({
        "httpCode": code.to_string(),
        "httpMessage": message,
        "message": message,
        "errorClass": "Exception"
    }))
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_catalog_of_250_items_is_fetched_in_three_pages() {
    let server = MockServer::start().await;

    for (offset, ids) in [(0, 0..100), (100, 100..200), (200, 200..250)] {
        Mock::given(method("GET"))
            .and(path(ITEMS))
            .and(query_param("offset", offset.to_string()))
            .respond_with(page("Item", 250, offset, 100, items(ids)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = create_client(&server, "valid", 5);
    let items = Item::all(&client, &ItemListParams::default()).await.unwrap();

    assert_eq!(items.len(), 250);
    let unique: HashSet<_> = items.iter().filter_map(|i| i.item_id.clone()).collect();
    assert_eq!(unique.len(), 250);
    assert_eq!(items[0].description.as_deref(), Some("Item 0"));
    assert_eq!(items[249].item_id.as_deref(), Some("249"));
}

#[tokio::test]
async fn test_single_record_collection_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/API/Account/12345/Category.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ls-api-bucket-level", "1/60")
                .insert_header("x-ls-api-drip-rate", "1")
                .set_body_json(json!({
                    "@attributes": {"count": "1", "offset": "0", "limit": "100"},
                    "Category": {"categoryID": "3", "name": "Shoes", "parentID": "0"}
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "valid", 5);
    let categories = Category::all(&client, &CategoryListParams::default())
        .await
        .unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name.as_deref(), Some("Shoes"));
    assert!(categories[0].is_root());
}

#[tokio::test]
async fn test_orders_request_relations_as_json_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/API/Account/12345/Order.json"))
        .and(query_param("load_relations", r#"["Note"]"#))
        .respond_with(page(
            "Order",
            2,
            0,
            100,
            vec![
                json!({"orderID": "1", "refNum": "A", "Note": {"noteID": "10", "note": "x"}}),
                json!({"orderID": "2", "refNum": "B", "Note": {"noteID": "11", "note": ""}}),
            ],
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "valid", 5);
    let orders = Order::all(&client, &OrderListParams::with_relations(["Note"]))
        .await
        .unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].note_text(), "x");
}

#[tokio::test]
async fn test_find_item_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/API/Account/12345/Item/42.json"))
        .and(query_param("load_relations", r#"["ItemShops"]"#))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ls-api-bucket-level", "1/60")
                .insert_header("x-ls-api-drip-rate", "1")
                .set_body_json(json!({"Item": {"itemID": "42", "description": "Mug"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "valid", 5);
    let params = ItemFindParams {
        load_relations: Some(vec!["ItemShops".to_string()]),
    };
    let item = tokio_test::assert_ok!(Item::find(&client, "42", &params).await);
    assert_eq!(item.description.as_deref(), Some("Mug"));
}

// ============================================================================
// Error envelopes
// ============================================================================

#[tokio::test]
async fn test_expired_token_is_refreshed_once_and_used_for_the_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(header("authorization", "Bearer stale"))
        .respond_with(envelope(401, "Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token.php"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=store-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "renewed",
            "expires_in": 1800,
            "token_type": "bearer",
            "scope": "employee:all"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(header("authorization", "Bearer renewed"))
        .and(query_param("offset", "0"))
        .respond_with(page("Item", 2, 0, 100, items(0..2)))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "stale", 5);
    let items = Item::all(&client, &ItemListParams::default()).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(client.tokens().access_token().await, "renewed");
    assert_eq!(client.tokens().session().await.expires_in, Some(1800));
}

#[tokio::test]
async fn test_failed_refresh_surfaces_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(envelope(401, "Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "stale", 5);
    let result = Category::all(&client, &CategoryListParams::default()).await;

    assert!(matches!(result, Err(RestError::Auth(_))));
}

#[tokio::test]
async fn test_throttled_page_is_retried_on_same_offset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(query_param("offset", "0"))
        .respond_with(page("Item", 150, 0, 100, items(0..100)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(query_param("offset", "100"))
        .respond_with(envelope(422, "Unprocessable Entity"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(query_param("offset", "100"))
        .respond_with(page("Item", 150, 100, 100, items(100..150)))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "valid", 5);
    let items = Item::all(&client, &ItemListParams::default()).await.unwrap();

    assert_eq!(items.len(), 150);
}

#[tokio::test]
async fn test_unrecognized_errors_give_up_after_retry_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(envelope(500, "Internal Server Error"))
        .expect(4)
        .mount(&server)
        .await;

    let client = create_client(&server, "valid", 3);
    let result = Order::all(&client, &OrderListParams::default()).await;

    match result {
        Err(RestError::MaxRetries {
            path,
            attempts,
            last_status,
        }) => {
            assert_eq!(path, "Order.json");
            assert_eq!(attempts, 4);
            assert_eq!(last_status, 500);
        }
        other => panic!("expected MaxRetries, got {other:?}"),
    }
}

// ============================================================================
// Missing collections
// ============================================================================

#[tokio::test]
async fn test_item_page_without_collection_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ls-api-bucket-level", "1/60")
                .insert_header("x-ls-api-drip-rate", "1")
                .set_body_json(json!({"@attributes": {"count": "2", "offset": "0", "limit": "100"}})),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(query_param("offset", "0"))
        .respond_with(page("Item", 2, 0, 100, items(0..2)))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "valid", 5);
    let items = Item::all(&client, &ItemListParams::default()).await.unwrap();

    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_item_page_that_never_recovers_is_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ls-api-bucket-level", "1/60")
                .insert_header("x-ls-api-drip-rate", "1")
                .set_body_json(json!({"@attributes": {"count": "3", "offset": "0", "limit": "2"}})),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ITEMS))
        .and(query_param("offset", "2"))
        .respond_with(page("Item", 3, 2, 2, items(2..3)))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "valid", 1);
    let items = Item::all(&client, &ItemListParams::default()).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_id.as_deref(), Some("2"));
}

#[tokio::test]
async fn test_category_page_without_collection_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ls-api-bucket-level", "1/60")
                .insert_header("x-ls-api-drip-rate", "1")
                .set_body_json(json!({"@attributes": {"count": "5", "offset": "0", "limit": "100"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, "valid", 5);
    let result = Category::all(&client, &CategoryListParams::default()).await;

    assert!(matches!(
        result,
        Err(RestError::MissingCollection {
            key: "Category",
            ..
        })
    ));
}
