use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::endpoint::endpoints;
use crate::handler::{self, SharedLedger};

/// Build the axum router with all Tally endpoints.
pub fn build_router(ledger: SharedLedger, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route(
            endpoints::HEALTH,
            get(handler::health_handler).fallback(handler::not_found_handler),
        )
        .route(
            endpoints::BALANCE,
            get(handler::balance_handler).fallback(handler::not_found_handler),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(handler::list_transactions_handler).fallback(handler::not_found_handler),
        )
        .route(
            endpoints::TRANSACTION,
            get(handler::get_transaction_handler).fallback(handler::not_found_handler),
        )
        .route(
            endpoints::DEPOSIT,
            post(handler::deposit_handler).fallback(handler::not_found_handler),
        )
        .route(
            endpoints::WITHDRAW,
            post(handler::withdraw_handler).fallback(handler::not_found_handler),
        )
        .route(
            endpoints::STATS,
            get(handler::stats_handler).fallback(handler::not_found_handler),
        )
        .fallback(handler::not_found_handler)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(ledger);

    if config.cors {
        router = router.layer(CorsLayer::permissive());
    }
    router.layer(TraceLayer::new_for_http())
}
