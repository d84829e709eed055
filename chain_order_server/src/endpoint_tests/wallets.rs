use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use chain_order_engine::{db_types::Wallet, StoreError, WalletApi};
use chrono::Utc;
use serde_json::Value;

use super::{helpers::send_request, mocks::MockWalletStore};
use crate::routes::{DeregisterWalletRoute, RegisterWalletRoute};

fn configure(store: MockWalletStore) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(RegisterWalletRoute::<MockWalletStore>::new())
            .service(DeregisterWalletRoute::<MockWalletStore>::new())
            .app_data(web::Data::new(WalletApi::new(store)));
    }
}

#[actix_web::test]
async fn register_wallet() {
    let mut store = MockWalletStore::new();
    store
        .expect_register_wallet()
        .withf(|w| w.address == "0xA" && w.user_id == "alice")
        .times(1)
        .returning(|w| Ok(Wallet { address: w.address, user_id: w.user_id, created_at: Utc::now() }));
    let (status, body) = send_request(TestRequest::post().uri("/wallet/alice/0xA"), configure(store)).await;
    assert_eq!(status, StatusCode::OK);
    let wallet: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(wallet["address"], "0xA");
    assert_eq!(wallet["userid"], "alice");
}

#[actix_web::test]
async fn register_taken_wallet() {
    let mut store = MockWalletStore::new();
    store.expect_register_wallet().returning(|w| Err(StoreError::WalletAlreadyExists(w.address)));
    let (status, body) = send_request(TestRequest::post().uri("/wallet/bob/0xA"), configure(store)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, r#"{"error":"The record already exists. Wallet 0xA is already registered"}"#);
}

#[actix_web::test]
async fn deregister_wallet() {
    let mut store = MockWalletStore::new();
    store.expect_deregister_wallet().returning(|address, user_id| Ok(address == "0xA" && user_id == "alice"));
    let (status, _) = send_request(TestRequest::delete().uri("/wallet/alice/0xA"), configure(store)).await;
    assert_eq!(status, StatusCode::OK);

    let mut store = MockWalletStore::new();
    store.expect_deregister_wallet().returning(|address, user_id| Ok(address == "0xA" && user_id == "alice"));
    let (status, _) = send_request(TestRequest::delete().uri("/wallet/bob/0xA"), configure(store)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn database_failures_are_server_errors() {
    let mut store = MockWalletStore::new();
    store.expect_deregister_wallet().returning(|_, _| Err(StoreError::MigrationError("no such table".into())));
    let (status, body) = send_request(TestRequest::delete().uri("/wallet/alice/0xA"), configure(store)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("no such table"), "{body}");
}
