use chain_order_engine::{
    db_types::{NewOrder, NewWallet, Pagination},
    test_utils::prepare_env::{new_test_database, tear_down},
    ApiError,
    OrderApi,
    StoreError,
    WalletApi,
};
use chrono::{Duration, TimeZone, Utc};

#[tokio::test]
async fn create_and_query_orders() {
    let db = new_test_database().await;
    let api = OrderApi::new(db.clone());
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    for i in 0..5 {
        let mut order = NewOrder::new(format!("tx{i}"), "A".into(), format!("B{i}"), "NEO".into(), "1".into());
        order.created_at = start + Duration::minutes(i);
        api.create_order(order).await.expect("Error creating order");
    }
    // Different asset, must not show up
    api.create_order(NewOrder::new("gas1", "A", "B0", "GAS", "2")).await.unwrap();

    let page = api.orders_for_address("A", "NEO", Pagination::new(0, 2)).await.unwrap();
    let txs = page.iter().map(|o| o.tx.as_str()).collect::<Vec<_>>();
    assert_eq!(txs, vec!["tx4", "tx3"]);
    let page = api.orders_for_address("A", "NEO", Pagination::new(2, 2)).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].tx, "tx0");
    let page = api.orders_for_address("B3", "NEO", Pagination::new(0, 10)).await.unwrap();
    assert_eq!(page.len(), 1);

    assert_eq!(api.order_status("tx1").await.unwrap(), Some(false));
    assert_eq!(api.order_status("nope").await.unwrap(), None);
    tear_down(db).await;
}

#[tokio::test]
async fn invalid_order_requests() {
    let db = new_test_database().await;
    let api = OrderApi::new(db.clone());
    let err = api.create_order(NewOrder::new("tx1", "", "B", "NEO", "")).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(ref m) if m == "missing fields: from, value"));

    api.create_order(NewOrder::new("tx1", "A", "B", "NEO", "1")).await.unwrap();
    let err = api.create_order(NewOrder::new("tx1", "A", "B", "NEO", "1")).await.unwrap_err();
    assert!(matches!(err, ApiError::StoreError(StoreError::OrderAlreadyExists(_))));

    let err = api.orders_for_address("A", "NEO", Pagination::new(0, 0)).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
    let err = api.orders_for_address("A", "NEO", Pagination::new(0, 101)).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
    let err = api.order_status(" ").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));
    tear_down(db).await;
}

#[tokio::test]
async fn wallet_registration_lifecycle() {
    let db = new_test_database().await;
    let api = WalletApi::new(db.clone());
    let wallet = api.register_wallet(NewWallet::new("A", "alice")).await.unwrap();
    assert_eq!(wallet.user_id, "alice");

    let err = api.register_wallet(NewWallet::new("A", "bob")).await.unwrap_err();
    assert!(matches!(err, ApiError::StoreError(StoreError::WalletAlreadyExists(_))));
    let err = api.register_wallet(NewWallet::new("", "bob")).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidArgument(_)));

    assert!(!api.deregister_wallet("A", "bob").await.unwrap(), "bob does not own A");
    assert!(api.fetch_wallet("A").await.unwrap().is_some());
    assert!(api.deregister_wallet("A", "alice").await.unwrap());
    assert!(api.fetch_wallet("A").await.unwrap().is_none());
    tear_down(db).await;
}
