//! Route configuration for the temperature API.

use std::sync::Arc;

use axum::routing::{get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{health_check, insert_reading, list_devices, list_readings};
use crate::page::dashboard_page;
use crate::state::AppState;

/// Create the dashboard router.
///
/// `/api` is registered flat rather than nested so the bare path matches
/// both the GET and POST verbs probes and the page rely on.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(state.config());

    Router::new()
        // Embedded dashboard page
        .route("/", get(dashboard_page))
        // Reading ingest and listing
        .route("/api", get(list_readings).post(insert_reading))
        // Device summaries
        .route("/api/devices", get(list_devices))
        // Health check
        .route("/api/health", get(health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &crate::config::DashboardConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use therm_proto::NewReading;
    use therm_store::ReadingStore;
    use tower::ServiceExt;

    fn make_test_state() -> Arc<AppState> {
        let config = crate::config::DashboardConfig::default();
        let store = Arc::new(ReadingStore::open_in_memory().unwrap());
        Arc::new(AppState::new(config, store))
    }

    fn post_reading(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_submit_reading_returns_created() {
        let state = make_test_state();
        let app = create_router(state);

        let response = app
            .oneshot(post_reading(json!({ "temperature": 23.5 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await, json!({ "ok": true, "id": 1 }));
    }

    #[tokio::test]
    async fn test_submit_accepts_device_and_metadata() {
        let state = make_test_state();
        let app = create_router(state);

        let payload = json!({
            "temperature": 21.25,
            "device_id": "pico_w_001",
            "metadata": { "battery": 3.9 }
        });
        let response = app.clone().oneshot(post_reading(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = Request::builder().uri("/api").body(Body::empty()).unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["data"][0]["device_id"], "pico_w_001");
        assert_eq!(json["data"][0]["metadata"]["battery"], 3.9);
    }

    #[tokio::test]
    async fn test_submit_rejects_out_of_range() {
        let state = make_test_state();
        let app = create_router(Arc::clone(&state));

        let response = app
            .oneshot(post_reading(json!({ "temperature": 150.3 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "ok": false,
                "error": "temperature must be a number between -50 and 100"
            })
        );

        // A rejected reading must not be stored.
        assert_eq!(state.store().count_all().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_non_numeric_temperature() {
        let state = make_test_state();
        let app = create_router(state);

        let response = app
            .oneshot(post_reading(json!({ "temperature": "hot" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
        assert_eq!(
            json["error"],
            "temperature must be a number between -50 and 100"
        );
    }

    #[tokio::test]
    async fn test_submit_accepts_range_boundaries() {
        let state = make_test_state();
        let app = create_router(state);

        for temperature in [-50.0, 100.0] {
            let response = app
                .clone()
                .oneshot(post_reading(json!({ "temperature": temperature })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }
    }

    #[tokio::test]
    async fn test_list_empty() {
        let state = make_test_state();
        let app = create_router(state);

        let request = Request::builder().uri("/api").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["data"], json!([]));
        assert_eq!(
            json["meta"],
            json!({ "total": 0, "limit": 100, "offset": 0, "hasMore": false })
        );
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let state = make_test_state();
        for i in 1..=3 {
            let reading = NewReading::new(20.0 + f64::from(i));
            state.store().insert(&reading).unwrap();
        }
        let app = create_router(state);

        let request = Request::builder().uri("/api").body(Body::empty()).unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["data"][0]["id"], 3);
        assert_eq!(json["data"][2]["id"], 1);
    }

    #[tokio::test]
    async fn test_pagination_reports_has_more() {
        let state = make_test_state();
        for i in 0..5 {
            state.store().insert(&NewReading::new(f64::from(i))).unwrap();
        }
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api?limit=2")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["meta"]["hasMore"], true);

        // offset + limit == total is the last page.
        let request = Request::builder()
            .uri("/api?limit=2&offset=3")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["meta"]["hasMore"], false);

        let request = Request::builder()
            .uri("/api?limit=2&offset=4")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["meta"]["hasMore"], false);
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        let state = make_test_state();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api?limit=99999")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["meta"]["limit"], 1000);
    }

    #[tokio::test]
    async fn test_malformed_pagination_falls_back_to_defaults() {
        let state = make_test_state();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api?limit=abc&offset=-5")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["meta"]["limit"], 100);
        assert_eq!(json["meta"]["offset"], 0);
    }

    #[tokio::test]
    async fn test_device_filter() {
        let state = make_test_state();
        state
            .store()
            .insert(&NewReading::new(21.0).with_device_id("garage"))
            .unwrap();
        state
            .store()
            .insert(&NewReading::new(22.0).with_device_id("attic"))
            .unwrap();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api?device_id=garage")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["meta"]["total"], 1);
        assert_eq!(json["data"][0]["device_id"], "garage");
    }

    #[tokio::test]
    async fn test_location_alias_filters_by_device() {
        let state = make_test_state();
        state
            .store()
            .insert(&NewReading::new(21.0).with_device_id("garage"))
            .unwrap();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api?location=garage")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["meta"]["total"], 1);
    }

    #[tokio::test]
    async fn test_device_id_wins_over_location() {
        let state = make_test_state();
        state
            .store()
            .insert(&NewReading::new(21.0).with_device_id("garage"))
            .unwrap();
        state
            .store()
            .insert(&NewReading::new(22.0).with_device_id("attic"))
            .unwrap();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api?device_id=attic&location=garage")
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;

        assert_eq!(json["data"][0]["device_id"], "attic");
    }

    #[tokio::test]
    async fn test_devices_endpoint() {
        let state = make_test_state();
        state
            .store()
            .insert(&NewReading::new(21.0).with_device_id("garage"))
            .unwrap();
        state
            .store()
            .insert(&NewReading::new(22.0).with_device_id("garage"))
            .unwrap();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api/devices")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["data"][0]["device_id"], "garage");
        assert_eq!(json["data"][0]["readings"], 2);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let state = make_test_state();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["total_readings"], 0);
    }

    #[tokio::test]
    async fn test_root_serves_dashboard_page() {
        let state = make_test_state();
        let app = create_router(state);

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_cors_any_origin() {
        let state = make_test_state();
        let app = create_router(state);

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/health")
            .header("Origin", "http://example.com")
            .header("Access-Control-Request-Method", "GET")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        // Should allow the request (might be 200 or 204 depending on axum version)
        assert!(response.status().is_success() || response.status() == StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_cors_specific_origins() {
        let config = crate::config::DashboardConfig::default()
            .with_cors_origin("http://localhost:3000");
        let store = Arc::new(ReadingStore::open_in_memory().unwrap());
        let state = Arc::new(AppState::new(config, store));
        let _app = create_router(state);

        // Router created successfully with specific CORS origins
    }

    #[tokio::test]
    async fn test_unknown_endpoint() {
        let state = make_test_state();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/api/unknown")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
