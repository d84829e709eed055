use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use chain_order_engine::{db_types::Pagination, OrderApi, StoreError};
use serde_json::{json, Value};

use super::{
    helpers::{sample_order, send_request},
    mocks::MockOrderStore,
};
use crate::{
    routes::{confirm_order, CreateOrderRoute, OrderStatusRoute, OrdersForAddressRoute},
    source::{confirmation_feed, ConfirmationSource, SourceItem},
};

fn configure(store: MockOrderStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(CreateOrderRoute::<MockOrderStore>::new())
            .service(OrderStatusRoute::<MockOrderStore>::new())
            .service(OrdersForAddressRoute::<MockOrderStore>::new())
            .app_data(web::Data::new(OrderApi::new(store)));
    }
}

fn status_store() -> MockOrderStore {
    let mut store = MockOrderStore::new();
    store.expect_fetch_order_by_tx().returning(|tx| match tx {
        "confirmed" => Ok(Some(sample_order(tx, true))),
        "pending" => Ok(Some(sample_order(tx, false))),
        _ => Ok(None),
    });
    store
}

#[actix_web::test]
async fn order_status() {
    for (tx, expected_status, expected_body) in [
        ("confirmed", StatusCode::OK, json!({"status": true})),
        ("pending", StatusCode::OK, json!({"status": false})),
        ("unknown", StatusCode::NOT_FOUND, json!({"error": "The data was not found. No order for unknown"})),
    ] {
        let req = TestRequest::get().uri(&format!("/order/{tx}"));
        let (status, body) = send_request(req, configure(status_store())).await;
        assert_eq!(status, expected_status, "{tx}");
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), expected_body);
    }
}

#[actix_web::test]
async fn create_order() {
    let mut store = MockOrderStore::new();
    store.expect_insert_pending_order().times(1).returning(|order| {
        let mut result = sample_order(&order.tx, false);
        result.created_at = order.created_at;
        Ok(result)
    });
    let req = TestRequest::post().uri("/order").set_json(json!({
        "tx": "0x1234", "from": "A", "to": "B", "asset": "NEO", "value": "5", "createTime": "2024-05-01T12:00:00Z"
    }));
    let (status, body) = send_request(req, configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    let order: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(order["tx"], "0x1234");
    assert_eq!(order["confirmTime"], Value::Null);
    assert_eq!(order["block"], -1);
}

#[actix_web::test]
async fn create_order_with_missing_fields() {
    let mut store = MockOrderStore::new();
    store.expect_insert_pending_order().never();
    let req = TestRequest::post()
        .uri("/order")
        .set_json(json!({"tx": "0x1234", "from": "", "to": "B", "asset": "NEO", "value": ""}));
    let (status, body) = send_request(req, configure(store)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid request. missing fields: from, value"}"#);
}

#[actix_web::test]
async fn duplicate_order() {
    let mut store = MockOrderStore::new();
    store.expect_insert_pending_order().returning(|order| Err(StoreError::OrderAlreadyExists(order.tx)));
    let req = TestRequest::post()
        .uri("/order")
        .set_json(json!({"tx": "0x1234", "from": "A", "to": "B", "asset": "NEO", "value": "5"}));
    let (status, _) = send_request(req, configure(store)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn orders_for_address() {
    let mut store = MockOrderStore::new();
    store
        .expect_fetch_orders_for_address()
        .withf(|address, asset, page| {
            address.to_string() == "A" && asset.to_string() == "NEO" && *page == Pagination::new(2, 10)
        })
        .times(1)
        .returning(|_, _, _| Ok(vec![sample_order("t2", true), sample_order("t1", false)]));
    let req = TestRequest::get().uri("/orders/A/NEO/2/10");
    let (status, body) = send_request(req, configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["tx"], "t2");
    assert_eq!(orders[0]["createTime"], "2024-05-01T12:00:00Z");
}

#[actix_web::test]
async fn orders_page_size_is_limited() {
    for uri in ["/orders/A/NEO/0/0", "/orders/A/NEO/0/101"] {
        let mut store = MockOrderStore::new();
        store.expect_fetch_orders_for_address().never();
        let (status, _) = send_request(TestRequest::get().uri(uri), configure(store)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn confirmation_is_accepted_once_committed() {
    let (publisher, mut source) = confirmation_feed(4);
    let consumer = tokio::spawn(async move {
        match source.next_item().await {
            Some(SourceItem::Event(event)) => {
                let txid = event.txid().into_owned();
                source.commit(event).await.unwrap();
                txid
            },
            other => panic!("Expected a confirmation event, got {other:?}"),
        }
    });
    let req = TestRequest::post().uri("/order/0xabc");
    let (status, body) = send_request(req, |cfg: &mut ServiceConfig| {
        cfg.service(confirm_order).app_data(web::Data::new(publisher));
    })
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"tx": "0xabc", "offset": 0}));
    assert_eq!(consumer.await.unwrap(), "0xabc");
}
