//! # Price sync server
//! This crate hosts the HTTP service in front of the price sync engine. It is responsible for:
//! * Accepting price update triggers and starting a sync run in the background.
//! * Acknowledging the caller immediately; run outcomes are observable through the logs only.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Routes
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/ozon_seller/update_prices`: Accepts a client selector (an id, a list of ids, or `"all"`)
//!   and starts one sync run.

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
