use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::admin::AdminResource;
use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{events, health_check, resources, site_index};
use crate::models::{
    Address, Company, Enrollment, Event, Order, OrderItem, Payment, Ticket, TicketSale, User,
};
use crate::state::AppState;

/// Changelist and CRUD routes for one registered table.
fn resource_routes<R: AdminResource>() -> Router<AppState> {
    let slug = R::model_admin().slug;

    Router::new()
        .route(
            &format!("/admin/api/{}", slug),
            get(resources::list::<R>).post(resources::create::<R>),
        )
        .route(
            &format!("/admin/api/{}/:id", slug),
            get(resources::detail::<R>)
                .put(resources::update::<R>)
                .delete(resources::delete::<R>),
        )
}

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/admin", get(site_index))
        .route("/admin/events/add", get(events::add_form).post(events::add))
        .route(
            "/admin/events/:id/change",
            get(events::change_form).post(events::change),
        )
        .merge(resource_routes::<Event>())
        .merge(resource_routes::<Enrollment>())
        .merge(resource_routes::<Order>())
        .merge(resource_routes::<Payment>())
        .merge(resource_routes::<Ticket>())
        .merge(resource_routes::<User>())
        .merge(resource_routes::<Address>())
        .merge(resource_routes::<Company>())
        .merge(resource_routes::<OrderItem>())
        .merge(resource_routes::<TicketSale>())
        .with_state(state);

    create_security_headers_layer()
        .apply(router)
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config {
            database_url: "postgres://localhost/tickets_test".to_string(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            max_connections: 1,
            page_size: 100,
        };
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        create_routes(AppState::new(pool, &config))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["service"], "tickets-admin");
    }

    #[tokio::test]
    async fn test_security_headers_are_set() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert_eq!(response.headers()["cache-control"], "no-store");
    }

    #[tokio::test]
    async fn test_site_index_lists_registered_models() {
        let (status, body) = get_json("/admin").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["site_header"], "Tickets IFSP Admin");
        assert_eq!(body["data"]["models"].as_array().unwrap().len(), 10);
        assert_eq!(body["data"]["models"][0]["slug"], "events");
    }

    #[tokio::test]
    async fn test_new_event_form_is_prefilled() {
        let (status, body) = get_json("/admin/events/add").await;
        assert_eq!(status, StatusCode::OK);

        let data = &body["data"];
        assert_eq!(data["is_new"], true);
        assert_eq!(data["initial"]["status"], 3);

        let rows = data["configurations"]["rows"].as_array().unwrap();
        let keys: Vec<&str> = rows.iter().map(|r| r["key"].as_str().unwrap()).collect();
        assert_eq!(
            keys,
            vec![
                "HAS_DEFAULT_TICKET",
                "DEFAULT_TICKET_ID",
                "END_SELLING_DATE",
                "START_SELLING_DATE"
            ]
        );
        assert_eq!(rows[0]["value"], "false");
        assert_eq!(rows[1]["value"], "");
    }

    #[tokio::test]
    async fn test_invalid_changelist_filter_is_rejected_before_querying() {
        let (status, body) = get_json("/admin/api/payments?amount=10").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_payment_status_uses_error_envelope() {
        let payload = serde_json::json!({
            "order_id": 7,
            "amount": "10.00",
            "currency": "BRL",
            "external_id": "mp-123",
            "payment_type": "pix",
            "status": "PAID"
        });
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/api/payments")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_key_uses_error_envelope() {
        let (status, body) = get_json("/admin/api/events/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = get_json("/admin/events/42/change").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_event_form_is_rejected_before_saving() {
        let payload = serde_json::json!({
            "event": {
                "name": "Semana",
                "init_date": "2024-05-01",
                "end_date": "2024-05-03"
            },
            "configurations": [
                { "key": "DEFAULT_TICKET_ID", "value": "" },
                { "key": "DEFAULT_TICKET_ID", "value": "x" }
            ]
        });
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/admin/events/add")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
