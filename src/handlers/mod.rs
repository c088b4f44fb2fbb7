use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::state::AppState;
use crate::utils::response::success;

pub mod events;
pub mod resources;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "tickets-admin",
    };

    success(payload, "Health check successful")
}

/// Site titles and every registered model, for the console's index page.
pub async fn site_index(State(state): State<AppState>) -> Response {
    success(state.site.as_ref(), "Admin site")
}
