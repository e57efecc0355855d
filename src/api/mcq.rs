//! 选择题生成端点

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::{McqListResponse, TopicRequest};
use crate::state::AppState;

/// 根据主题生成选择题
async fn generate_mcqs(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TopicRequest>, JsonRejection>,
) -> AppResult<Json<McqListResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        AppError::UnprocessableEntity(rejection.body_text())
    })?;

    let mcqs = state.mcq_service.generate(&req.topic).await?;
    Ok(Json(McqListResponse { mcqs }))
}

/// 创建选择题路由
pub fn mcq_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate_mcqs", post(generate_mcqs))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::api::create_app;
    use crate::llm::{GenerateContentResponse, GenerationClient};
    use crate::services::testing::{FakeClient, Reply};
    use crate::state::create_shared_state;

    fn origins() -> Vec<String> {
        vec![
            "https://mcq-generator-chi.vercel.app".to_string(),
            "http://localhost:3000".to_string(),
        ]
    }

    async fn post_json(client: &Arc<FakeClient>, body: &str) -> Response {
        let generator = Arc::clone(client) as Arc<dyn GenerationClient>;
        let app = create_app(create_shared_state(generator, "gemini-2.0-flash"), &origins());
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate_mcqs")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_generate_success() {
        let client = Arc::new(FakeClient::text(
            "Q1 body\nCorrect Answer: B\nExplanation: because.\n---\nQ2 body\nExplanation: other.",
        ));
        let response = post_json(&client, r#"{"topic":"Biology"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "mcqs": [
                    { "question": "Q1 body", "correct_answer": "b", "explanation": "because." },
                    { "question": "Q2 body", "correct_answer": null, "explanation": "other." }
                ]
            })
        );
        assert!(client.requests.lock().unwrap()[0].prompt.contains("Biology"));
    }

    #[tokio::test]
    async fn test_blank_topic_is_bad_request() {
        let client = Arc::new(FakeClient::text("unused"));
        let response = post_json(&client, r#"{"topic":"   "}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "detail": "Topic is required" }));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_client_failure_is_internal_error() {
        let client = Arc::new(FakeClient::new(Reply::ApiError(
            403,
            "API key not valid.".to_string(),
        )));
        let response = post_json(&client, r#"{"topic":"Rust"}"#).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error: "));
        assert!(detail.contains("API key not valid."));
    }

    #[tokio::test]
    async fn test_missing_model_output_is_internal_error() {
        let client = Arc::new(FakeClient::new(Reply::Response(
            GenerateContentResponse::default(),
        )));
        let response = post_json(&client, r#"{"topic":"Rust"}"#).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "detail": "No MCQs generated" }));
    }

    #[tokio::test]
    async fn test_whitespace_model_output_is_empty_list() {
        let client = Arc::new(FakeClient::text("   \n "));
        let response = post_json(&client, r#"{"topic":"Rust"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "mcqs": [] }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_unprocessable() {
        let client = Arc::new(FakeClient::text("unused"));
        for body in [r#"{"subject":"Rust"}"#, r#"{"topic":42}"#, "not json"] {
            let response = post_json(&client, body).await;
            assert!(response.status().is_client_error());
            assert!(body_json(response).await["detail"].is_string());
        }
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_cors_preflight_for_allowed_origin() {
        let client = Arc::new(FakeClient::text("unused"));
        let generator = Arc::clone(&client) as Arc<dyn GenerationClient>;
        let app = create_app(create_shared_state(generator, "gemini-2.0-flash"), &origins());

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/generate_mcqs")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "POST");
    }

    #[tokio::test]
    async fn test_cors_rejects_unknown_origin() {
        let client = Arc::new(FakeClient::text("Q"));
        let generator = Arc::clone(&client) as Arc<dyn GenerationClient>;
        let app = create_app(create_shared_state(generator, "gemini-2.0-flash"), &origins());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/generate_mcqs")
                    .header(header::ORIGIN, "https://evil.example")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"topic":"Rust"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
