//! HTTP server for Tally.
//!
//! Exposes the ledger core as a small JSON API. Every response is an object
//! with a boolean `success` field; failures add an `error` message.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, BIND_ENV, DEFAULT_PORT, PORT_ENV};
pub use endpoint::{endpoints, HealthResponse, PageParams, RecordRequest};
pub use error::{ServerError, ServerResult};
pub use handler::SharedLedger;
pub use server::TallyServer;
