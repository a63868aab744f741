use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::create_account::create_account;
use super::handlers::get_profile::get_profile;
use super::handlers::login::login;
use super::handlers::refresh_token::refresh_token;
use super::middleware::authenticate as auth_middleware;
use crate::account::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub token_service: Arc<TokenService>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    token_service: Arc<TokenService>,
) -> Router {
    let state = AppState {
        account_service,
        token_service,
    };

    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/accounts", post(create_account));

    let protected_routes = Router::new()
        .route("/api/auth/refresh", post(refresh_token))
        .route("/api/accounts/me", get(get_profile))
        .route("/api/accounts/me/password", put(change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
