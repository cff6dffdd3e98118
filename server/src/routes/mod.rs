//! JSON API over the directory.
use axum::{
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{fetcher::DocumentSource, state::AppState};

pub mod cipher_suites;
pub mod rfcs;
pub mod search;
pub mod technologies;
pub mod vulnerabilities;

pub fn router<S: DocumentSource + Clone + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/cipher-suites",
            get(cipher_suites::list_cipher_suites).post(cipher_suites::create_cipher_suite),
        )
        .route(
            "/cipher-suites/{name}",
            get(cipher_suites::get_cipher_suite).delete(cipher_suites::delete_cipher_suite),
        )
        .route("/rfcs", get(rfcs::list_rfcs).post(rfcs::create_rfc::<S>))
        .route(
            "/rfcs/{number}",
            get(rfcs::get_rfc)
                .put(rfcs::update_rfc::<S>)
                .delete(rfcs::delete_rfc),
        )
        .route(
            "/technologies/{kind}",
            get(technologies::list_technologies).post(technologies::create_technology),
        )
        .route(
            "/technologies/{kind}/{short_name}",
            get(technologies::get_technology)
                .patch(technologies::update_technology)
                .delete(technologies::delete_technology),
        )
        .route(
            "/technologies/{kind}/{short_name}/vulnerabilities/{id}",
            put(technologies::link_vulnerability).delete(technologies::unlink_vulnerability),
        )
        .route(
            "/technologies/{kind}/",
            get(technologies::get_unnamed_technology)
                .patch(technologies::update_unnamed_technology)
                .delete(technologies::delete_unnamed_technology),
        )
        .route(
            "/technologies/{kind}//vulnerabilities/{id}",
            put(technologies::link_unnamed_vulnerability)
                .delete(technologies::unlink_unnamed_vulnerability),
        )
        .route(
            "/vulnerabilities",
            get(vulnerabilities::list_vulnerabilities).post(vulnerabilities::create_vulnerability),
        )
        .route(
            "/vulnerabilities/{id}",
            get(vulnerabilities::get_vulnerability)
                .put(vulnerabilities::update_vulnerability)
                .delete(vulnerabilities::delete_vulnerability),
        )
        .route("/search", get(search::search))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
