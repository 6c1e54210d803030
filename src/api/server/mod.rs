mod handlers;

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::interface::DynAPI;
use crate::api::API;

pub fn app(api: DynAPI) -> Router {
    // Development CORS: the map frontend runs on a separate dev server.
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/api/hello", get(handlers::hello::hello))
        .route("/api/route", get(handlers::route::get_route))
        .route("/api/search", get(handlers::search::search))
        .route("/api/searchahead", get(handlers::search::search_ahead))
        .route("/api/walk", post(handlers::walk::create_walk))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, port: u16) {
    tracing_subscriber::fmt::init();

    let api = Arc::new(api) as DynAPI;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app(api).into_make_service())
        .await
        .unwrap();
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!(%detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "Internal server error" })),
    )
        .into_response()
}
