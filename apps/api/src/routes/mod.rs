pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::deck::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Fit engine
        .route("/api/v1/layouts", get(handlers::handle_list_layouts))
        .route("/api/v1/layout/fit", post(handlers::handle_fit_text))
        // Deck assembly
        .route("/api/v1/deck/layout", post(handlers::handle_layout_deck))
        .route("/api/v1/deck/layout/raw", post(handlers::handle_layout_raw))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::deck::theme::ColorScheme;
    use crate::layout::LayoutPreset;

    fn test_state() -> AppState {
        AppState::new(Config {
            port: 0,
            rust_log: "info".to_string(),
            default_layout: LayoutPreset::Widescreen16x9,
            default_color_scheme: ColorScheme::Professional,
            max_font_size: 24,
            min_font_size: 8,
            grid_margin_factor: 0.9,
            slide_margin: 0.5,
            word_break_threshold: 0.7,
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_layouts() {
        let request = Request::get("/api/v1/layouts").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layouts"].as_array().unwrap().len(), 4);
        assert_eq!(body["default_layout"], "LAYOUT_16x9");
    }

    #[tokio::test]
    async fn test_fit_short_title() {
        let request = post_json(
            "/api/v1/layout/fit",
            json!({"text": "Short title", "width": 8.0, "height": 3.0}),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["line_fit"]["font_size"], 24);
        assert_eq!(body["line_fit"]["fits"], true);
        assert_eq!(body["boxes"], json!(["Short title"]));
    }

    #[tokio::test]
    async fn test_fit_rejects_non_positive_dimensions() {
        let request = post_json(
            "/api/v1/layout/fit",
            json!({"text": "x", "width": 0.0, "height": 3.0}),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_deck_layout_structured() {
        let request = post_json(
            "/api/v1/deck/layout",
            json!({
                "deck": {"slides": [
                    {"type": "title", "title": "Urban Farming", "subtitle": "Food where we live"},
                    {"type": "bullets", "title": "Benefits", "bullets": ["Fresh", "Local"]}
                ]},
                "options": {"color_scheme": "modern"}
            }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slides"].as_array().unwrap().len(), 2);
        assert_eq!(body["palette"]["scheme"], "modern");
        assert_eq!(body["overflow_count"], 0);
    }

    #[tokio::test]
    async fn test_deck_layout_raw_with_fences() {
        let content = "```json\n{\"slides\": [{\"type\": \"text\", \"title\": \"Why\", \"body\": \"Because.\"}]}\n```";
        let request = post_json(
            "/api/v1/deck/layout/raw",
            json!({"content": content, "options": {"layout_name": "LAYOUT_4x3"}}),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"]["preset"], "LAYOUT_4x3");
        assert_eq!(body["slides"][0]["elements"][1]["role"], "body");
    }

    #[tokio::test]
    async fn test_deck_layout_raw_garbage_is_unprocessable() {
        let request = post_json(
            "/api/v1/deck/layout/raw",
            json!({"content": "Sure! Here is your deck."}),
        );
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = Request::get("/nope").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
