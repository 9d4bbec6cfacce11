use crate::webhook::data_types::Ack;
use crate::webhook::error::Error;
use crate::webhook::message_handler::Handler;
use crate::webhook::timestamp::Timestamp;
use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use log::{debug, error, warn};
use serde_json::json;
use std::sync::Arc;

pub const SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

#[derive(Clone)]
pub struct AppState {
    pub handler: Handler,
    pub secret: Option<Arc<str>>,
}

impl AppState {
    pub fn new(handler: Handler, secret: Option<String>) -> Self {
        Self {
            handler,
            secret: secret.map(Arc::from),
        }
    }
}

pub fn get_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_update).fallback(handle_running))
        .route_layer(middleware::from_fn_with_state(state.clone(), secret_guard))
        .route("/health", get(handle_health))
        .with_state(state)
}

async fn handle_update(State(state): State<AppState>, body: Bytes) -> Response {
    debug!("Received update: {}", String::from_utf8_lossy(&body));
    match state.handler.handle_post(&body).await {
        Ok(Ack::Json) => Json(json!({ "ok": true })).into_response(),
        Ok(Ack::Text(text)) => text.into_response(),
        Err(Error::Validation(e)) => {
            warn!("Rejected update: {e}");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(Error::Send(e)) => {
            error!("Failed to send reply: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to send reply").into_response()
        }
    }
}

async fn handle_running(State(state): State<AppState>) -> &'static str {
    state.handler.reply_mode().running_banner()
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "time": Timestamp::now().as_secs() }))
}

/// Only webhook posts are guarded; the liveness banner stays open.
async fn secret_guard(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let Some(expected) = state.secret.as_deref() else {
        return next.run(req).await;
    };
    if req.method() != Method::POST {
        return next.run(req).await;
    }

    let provided = req
        .headers()
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !secret_matches(provided, expected) {
        warn!("Webhook post with wrong secret token");
        return (StatusCode::UNAUTHORIZED, "Not authenticated!").into_response();
    }

    next.run(req).await
}

/// Compares without short-circuiting on the first differing byte.
fn secret_matches(provided: &str, expected: &str) -> bool {
    let (a, b) = (provided.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
