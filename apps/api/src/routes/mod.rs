pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::analysis::handlers as analysis_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(analysis_handlers::handle_analyze))
        .route(
            "/api/v1/analyze/text",
            post(analysis_handlers::handle_analyze_text),
        )
        // Generation API
        .route(
            "/api/v1/cover-letter",
            post(generation_handlers::handle_cover_letter),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    const RESUME: &str = "Software engineer with experience in Python and machine learning";
    const JOB: &str = "Seeking a Python developer with machine learning expertise";
    const BOUNDARY: &str = "resume-optimizer-test-boundary";

    fn app() -> Router {
        build_router(AppState::from_config(Config::default()).unwrap())
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Builds a multipart body. `resume` is (file name, content type, bytes).
    fn multipart_request(resume: Option<(&str, &str, &[u8])>, job: &str) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        if let Some((file_name, content_type, bytes)) = resume {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{job}\r\n--{BOUNDARY}--\r\n"
            )
            .as_bytes(),
        );

        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_text_returns_score_and_suggestions() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/analyze/text",
                json!({"resume_text": RESUME, "job_description": JOB}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["score"], 50.0);
        assert_eq!(body["tier"], "moderate");
        assert_eq!(body["tier_label"], "Average");
        assert_eq!(body["color"], "orange");
        assert_eq!(body["suggestion_source"], "tiered");
        assert!(body["generated_suggestions"].is_null());
        assert_eq!(body["matched_terms"], json!(["Python", "learning", "machine"]));

        let suggestions = body["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 6);
        assert_eq!(suggestions[0], "Moderate match: Consider major updates");
        assert_eq!(suggestions[1], "1. Align resume keywords with job description");
        assert!(body["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_text_rejects_empty_job_description() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/analyze/text",
                json!({"resume_text": RESUME, "job_description": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Please provide a job description");
    }

    #[tokio::test]
    async fn test_analyze_multipart_text_upload() {
        let response = app()
            .oneshot(multipart_request(
                Some(("resume.txt", "text/plain", RESUME.as_bytes())),
                JOB,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["score"], 50.0);
        assert_eq!(body["missing_terms"], json!(["Seeking", "developer", "expertise"]));
    }

    #[tokio::test]
    async fn test_analyze_multipart_requires_resume() {
        let response = app().oneshot(multipart_request(None, JOB)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please upload a resume PDF");
    }

    #[tokio::test]
    async fn test_analyze_multipart_corrupt_pdf_is_unprocessable() {
        let response = app()
            .oneshot(multipart_request(
                Some(("resume.pdf", "application/pdf", b"%PDF-1.4 truncated")),
                JOB,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_cover_letter_validates_input_before_llm_check() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/cover-letter",
                json!({"resume_text": "", "job_description": JOB}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please provide resume text");
    }

    #[tokio::test]
    async fn test_cover_letter_without_llm_is_unavailable() {
        let response = app()
            .oneshot(json_request(
                "/api/v1/cover-letter",
                json!({"resume_text": RESUME, "job_description": JOB}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
