//! # Chain order server
//! This crate hosts the chain order service. It is responsible for:
//! * Consuming chain confirmation events and reconciling them against the order table.
//! * Notifying the owners of the wallets involved in a confirmed transfer, at a steady rate.
//! * Serving the REST API for wallet registration, order creation and order queries.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `GET /health`: A health check route that returns a 200 OK response.
//! * `POST /wallet/{userid}/{address}` and `DELETE /wallet/{userid}/{address}`: (De)register a wallet.
//! * `POST /order`: Create a pending order.
//! * `POST /order/{tx}`: Submit a confirmation for a transaction.
//! * `GET /order/{tx}`: Check whether an order has been confirmed.
//! * `GET /orders/{address}/{asset}/{offset}/{size}`: Page through the orders of an address.
pub mod cli;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod notifier;
pub mod push;
pub mod routes;
pub mod server;
pub mod source;
pub mod watcher;

#[cfg(test)]
mod endpoint_tests;
