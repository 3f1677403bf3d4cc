use axum::{routing::post, Router};

use crate::modules::ai::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/ai", post(controller::dispatch))
}
