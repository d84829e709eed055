//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two go into a separate module.
//!
//! Handlers must never block the worker thread. Every database or network call is awaited, so that the worker can
//! serve other requests in the meantime.
use actix_web::{get, post, web, HttpResponse, Responder};
use chain_order_engine::{
    db_types::{NewOrder, NewWallet, Pagination},
    OrderApi,
    OrderManagement,
    WalletApi,
    WalletManagement,
};
use log::*;
use serde_json::json;

use crate::{errors::ServerError, source::ConfirmationPublisher};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Wallets  ----------------------------------------------------
route!(register_wallet => Post "/wallet/{userid}/{address}" impl WalletManagement);
pub async fn register_wallet<B: WalletManagement>(
    path: web::Path<(String, String)>,
    api: web::Data<WalletApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, address) = path.into_inner();
    debug!("💻️ POST register wallet {address} for {user_id}");
    let wallet = api.register_wallet(NewWallet::new(address, user_id)).await?;
    Ok(HttpResponse::Ok().json(wallet))
}

route!(deregister_wallet => Delete "/wallet/{userid}/{address}" impl WalletManagement);
pub async fn deregister_wallet<B: WalletManagement>(
    path: web::Path<(String, String)>,
    api: web::Data<WalletApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, address) = path.into_inner();
    debug!("💻️ DELETE wallet {address} for {user_id}");
    if api.deregister_wallet(&address, &user_id).await? {
        Ok(HttpResponse::Ok().json(json!({ "address": address, "userid": user_id })))
    } else {
        Err(ServerError::NoRecordFound(format!("Wallet {address} is not registered to {user_id}")))
    }
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/order" impl OrderManagement);
pub async fn create_order<B: OrderManagement>(
    body: web::Json<NewOrder>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order = body.into_inner();
    debug!("💻️ POST new order for [{}]", order.tx);
    let order = api.create_order(order).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(order_status => Get "/order/{tx}" impl OrderManagement);
pub async fn order_status<B: OrderManagement>(
    path: web::Path<String>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let txid = path.into_inner();
    trace!("💻️ GET order status for [{txid}]");
    let status = api.order_status(&txid).await?.ok_or_else(|| ServerError::NoRecordFound(format!("No order for {txid}")))?;
    Ok(HttpResponse::Ok().json(json!({ "status": status })))
}

route!(orders_for_address => Get "/orders/{address}/{asset}/{offset}/{size}" impl OrderManagement);
pub async fn orders_for_address<B: OrderManagement>(
    path: web::Path<(String, String, u32, u32)>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (address, asset, offset, size) = path.into_inner();
    debug!("💻️ GET orders for {address} ({asset}), page {offset} of size {size}");
    let orders = api.orders_for_address(&address, &asset, Pagination::new(offset, size)).await?;
    Ok(HttpResponse::Ok().json(orders))
}

/// Submits a confirmation for the transaction to the confirmation feed. The reply is sent once the watcher has
/// committed the event. Whether the confirmation changed anything can be checked with `GET /order/{tx}`.
#[post("/order/{tx}")]
pub async fn confirm_order(
    path: web::Path<String>,
    publisher: web::Data<ConfirmationPublisher>,
) -> Result<HttpResponse, ServerError> {
    let txid = path.into_inner();
    debug!("💻️ POST confirmation for [{txid}]");
    let receipt = publisher.publish(&txid).await?;
    let offset = receipt.committed().await?;
    Ok(HttpResponse::Accepted().json(json!({ "tx": txid, "offset": offset })))
}
