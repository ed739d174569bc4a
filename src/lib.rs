pub mod bidding;
pub mod catalogue;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod gallery;
pub mod handlers;
pub mod query;
pub mod record_store;
pub mod server;
pub mod session;
