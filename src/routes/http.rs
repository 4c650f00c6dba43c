//! HTTP endpoint handlers. These are thin wrappers that forward to the quiz service.
//! Body rejections (bad JSON, wrong types) are reported as 400 with the usual `{msg}` shape.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::protocol::*;
use crate::quiz::{generate_quiz, parse_generate_request, parse_validate_request, validate_answers};
use crate::state::AppState;
use crate::util::trunc_for_log;

pub const LIVENESS_TEXT: &str = "YasuiPractice API Server is running!";

#[instrument(level = "info")]
pub async fn http_root() -> &'static str {
    LIVENESS_TEXT
}

fn body_or_400<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateIn>, JsonRejection>,
) -> Result<Json<Vec<QuizQuestionOut>>, AppError> {
    let body = body_or_400(payload)?;
    let (level, count) = parse_generate_request(&body)?;
    let questions = generate_quiz(state.store.as_ref(), level, count).await?;
    Ok(Json(questions))
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_validate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValidateIn>, JsonRejection>,
) -> Result<Json<Vec<AnswerResultOut>>, AppError> {
    let body = body_or_400(payload)?;
    let (quiz_type, answers) = parse_validate_request(body)?;
    if let Some(first) = answers.first() {
        debug!(target: "quiz", first_answer = %trunc_for_log(&first.user_answer, 40), "Validating answers");
    }
    let results = validate_answers(state.store.as_ref(), quiz_type, &answers).await?;
    Ok(Json(results))
}
