//! Router assembly: liveness, quiz API, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - liveness text at `/`
/// - quiz API under `/api/quiz/...`
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::http_root))
        .route("/api/quiz/generate", post(http::http_post_generate))
        .route("/api/quiz/validate", post(http::http_post_validate))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_word, JlptLevel, Word};
    use crate::protocol::{AnswerResultOut, QuizQuestionOut, SENTINEL};
    use crate::error::StoreError;
    use crate::store::{MemoryWordStore, WordStore};
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Store whose every call fails the way a dropped connection would.
    struct FailingStore;

    fn broken() -> StoreError {
        StoreError::InvalidRecord("connection reset by peer".into())
    }

    #[async_trait]
    impl WordStore for FailingStore {
        async fn sample_by_level(&self, _level: JlptLevel, _size: usize) -> Result<Vec<Word>, StoreError> {
            Err(broken())
        }
        async fn find_by_ids(&self, _ids: &[ObjectId]) -> Result<Vec<Word>, StoreError> {
            Err(broken())
        }
        async fn delete_all(&self) -> Result<u64, StoreError> {
            Err(broken())
        }
        async fn insert_many(&self, _words: Vec<Word>) -> Result<usize, StoreError> {
            Err(broken())
        }
        async fn count(&self) -> Result<u64, StoreError> {
            Err(broken())
        }
    }

    fn failing_app() -> Router {
        build_router(Arc::new(AppState::new(Arc::new(FailingStore))))
    }

    async fn test_app() -> Router {
        let store = MemoryWordStore::new();
        store
            .insert_many(vec![
                sample_word("日本", JlptLevel::N3, "니혼", "일본, 일본국"),
                sample_word("技術", JlptLevel::N3, "기쥬츠", "기술"),
            ])
            .await
            .unwrap();
        build_router(Arc::new(AppState::new(Arc::new(store))))
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_bytes(resp: Response) -> Vec<u8> {
        to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn root_reports_liveness() {
        let resp = test_app()
            .await
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_bytes(resp).await, http::LIVENESS_TEXT.as_bytes());
    }

    #[tokio::test]
    async fn generate_hides_answer_fields() {
        let resp = post_json(test_app().await, "/api/quiz/generate", json!({"level": "N3", "count": 5})).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let raw: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        let items = raw.as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            let obj = item.as_object().unwrap();
            assert!(obj.contains_key("_id") && obj.contains_key("word"));
            for hidden in ["reading", "meaning", "hangeul"] {
                assert!(!obj.contains_key(hidden));
            }
        }
        let typed: Vec<QuizQuestionOut> = serde_json::from_value(raw).unwrap();
        assert!(typed.iter().all(|q| q.id.len() == 24));
    }

    #[tokio::test]
    async fn generate_error_statuses() {
        let resp = post_json(test_app().await, "/api/quiz/generate", json!({"level": "N3"})).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let msg: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(msg["msg"], "Please provide both level and count.");

        let resp = post_json(test_app().await, "/api/quiz/generate", json!({"level": "N1", "count": 2})).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = test_app()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/quiz/generate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validate_round_trip_through_router() {
        let app = test_app().await;
        let resp = post_json(app.clone(), "/api/quiz/generate", json!({"level": "N3", "count": 2})).await;
        let questions: Vec<QuizQuestionOut> = serde_json::from_slice(&body_bytes(resp).await).unwrap();

        let mut answers: Vec<Value> = questions
            .iter()
            .map(|q| {
                let answer = if q.word == "日本" { " 일본국" } else { "틀림" };
                json!({"wordId": q.id, "userAnswer": answer})
            })
            .collect();
        answers.push(json!({"wordId": "0123456789abcdef01234567", "userAnswer": "x"}));

        let resp = post_json(app, "/api/quiz/validate", json!({"quizType": "meaning", "answers": answers})).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let results: Vec<AnswerResultOut> = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        assert_eq!(results.len(), 3);
        for (r, q) in results.iter().zip(&questions) {
            assert_eq!(r.word_id, q.id);
            assert_eq!(r.is_correct, q.word == "日本");
            assert_eq!(r.correct_answer.word, q.word);
        }
        assert!(!results[2].is_correct);
        assert_eq!(results[2].correct_answer.hangeul, SENTINEL);
    }

    #[tokio::test]
    async fn validate_rejects_bad_quiz_type_and_empty_answers() {
        let resp = post_json(test_app().await, "/api/quiz/validate", json!({"quizType": "kanji", "answers": [{"wordId": "a", "userAnswer": "b"}]})).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = post_json(test_app().await, "/api/quiz/validate", json!({"quizType": "pronunciation", "answers": []})).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_failure_is_opaque_server_error() {
        let resp = post_json(failing_app(), "/api/quiz/generate", json!({"level": "N3", "count": 2})).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_bytes(resp).await, b"Server Error");

        let answers = json!([{"wordId": ObjectId::new().to_hex(), "userAnswer": "니혼"}]);
        let resp = post_json(failing_app(), "/api/quiz/validate", json!({"quizType": "pronunciation", "answers": answers})).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_bytes(resp).await;
        assert_eq!(body, b"Server Error");
        assert!(!String::from_utf8_lossy(&body).contains("connection reset"));
    }

    #[tokio::test]
    async fn cors_is_permissive() {
        let resp = test_app()
            .await
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    }
}
