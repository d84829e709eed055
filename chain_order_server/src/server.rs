use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use chain_order_engine::{
    events::{EventHandlers, EventHooks},
    ConfirmationApi,
    OrderApi,
    SqliteDatabase,
    WalletApi,
};
use log::*;
use tokio::task::JoinHandle;

use crate::{
    config::{PushConfig, ServerConfig},
    errors::ServerError,
    notifier::Notifier,
    push::{push_queue, start_push_worker, DispatchSummary, HttpPushGateway, LogOnlyGateway, PushQueue},
    routes::{
        confirm_order,
        health,
        CreateOrderRoute,
        DeregisterWalletRoute,
        OrderStatusRoute,
        OrdersForAddressRoute,
        RegisterWalletRoute,
    },
    source::{confirmation_feed, ConfirmationPublisher},
    watcher::TxWatcher,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.run_migrations().await?;
    }
    let publisher = start_pipeline(&config, db.clone()).await?;
    let srv = create_server_instance(config, db, publisher)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Wires the confirmation pipeline together and starts its background tasks:
///
/// confirmation feed → watcher → order-confirmed hook → notifier → push queue → push worker
///
/// Returns the producer half of the confirmation feed. The pipeline winds down once every copy of it has been dropped.
pub async fn start_pipeline(config: &ServerConfig, db: SqliteDatabase) -> Result<ConfirmationPublisher, ServerError> {
    let (push_producer, queue) = push_queue(config.push.queue_capacity);
    let _push_worker = start_gateway_worker(&config.push, queue)?;

    let notifier = Arc::new(Notifier::new(db.clone(), Arc::new(config.asset_names.clone()), push_producer));
    let mut hooks = EventHooks::default();
    hooks.on_order_confirmed(move |ev| {
        let notifier = Arc::clone(&notifier);
        Box::pin(async move {
            notifier.notify(&ev.txid).await;
        })
    });
    let handlers = EventHandlers::new(config.feed_buffer_size, hooks);
    let producers = handlers.producers();
    let _event_handlers = handlers.start_handlers();

    let (publisher, source) = confirmation_feed(config.feed_buffer_size);
    let watcher = TxWatcher::new(source, ConfirmationApi::new(db, producers));
    tokio::spawn(watcher.run());
    Ok(publisher)
}

fn start_gateway_worker(config: &PushConfig, queue: PushQueue) -> Result<JoinHandle<DispatchSummary>, ServerError> {
    let worker = match config.url {
        Some(_) => start_push_worker(queue, HttpPushGateway::new(config)?, config.interval),
        None => start_push_worker(queue, LogOnlyGateway, config.interval),
    };
    Ok(worker)
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    publisher: ConfirmationPublisher,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let orders_api = OrderApi::new(db.clone());
        let wallet_api = WalletApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("cos::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(wallet_api))
            .app_data(web::Data::new(publisher.clone()))
            .service(health)
            .service(RegisterWalletRoute::<SqliteDatabase>::new())
            .service(DeregisterWalletRoute::<SqliteDatabase>::new())
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(confirm_order)
            .service(OrderStatusRoute::<SqliteDatabase>::new())
            .service(OrdersForAddressRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    info!("🚀️ Listening on {}:{}", config.host, config.port);
    Ok(srv)
}
