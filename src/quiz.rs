//! Quiz behaviors behind the HTTP handlers:
//!   - request validation for generate/validate bodies
//!   - random question generation at a level
//!   - batch answer scoring against stored words

use std::collections::{HashMap, HashSet};

use mongodb::bson::oid::ObjectId;
use tracing::{debug, info, instrument, warn};

use crate::domain::{JlptLevel, QuizType, Word};
use crate::error::AppError;
use crate::protocol::{to_question, AnswerIn, AnswerResultOut, CorrectAnswerOut, GenerateIn, QuizQuestionOut, ValidateIn};
use crate::store::WordStore;
use crate::util::{is_blank, parse_leading_int};

/// Check a generate body and extract `(level, count)`.
pub fn parse_generate_request(body: &GenerateIn) -> Result<(JlptLevel, usize), AppError> {
  if is_blank(body.level.as_ref()) || is_blank(body.count.as_ref()) {
    return Err(AppError::BadRequest("Please provide both level and count.".into()));
  }

  let count = body
    .count
    .as_ref()
    .and_then(parse_leading_int)
    .filter(|n| *n > 0)
    .ok_or_else(|| AppError::BadRequest("Count must be a positive number.".into()))?;

  let level = body
    .level
    .as_ref()
    .and_then(|v| v.as_str())
    .and_then(|s| s.parse::<JlptLevel>().ok())
    .ok_or_else(|| AppError::BadRequest("Please provide a valid level (N1, N2, N3, N4 or N5).".into()))?;

  Ok((level, usize::try_from(count).unwrap_or(usize::MAX)))
}

/// Check a validate body and extract `(quiz_type, answers)`.
pub fn parse_validate_request(body: ValidateIn) -> Result<(QuizType, Vec<AnswerIn>), AppError> {
  let quiz_type = body
    .quiz_type
    .as_ref()
    .and_then(|v| v.as_str())
    .and_then(|s| s.parse::<QuizType>().ok())
    .ok_or_else(|| AppError::BadRequest("Please provide a valid quizType ('pronunciation' or 'meaning').".into()))?;

  let answers = match body.answers {
    Some(v @ serde_json::Value::Array(_)) if v.as_array().map_or(false, |a| !a.is_empty()) => v,
    _ => return Err(AppError::BadRequest("Please provide an array of answers.".into())),
  };
  let answers: Vec<AnswerIn> = serde_json::from_value(answers)
    .map_err(|e| AppError::BadRequest(format!("Each answer needs a string wordId and userAnswer: {e}")))?;

  Ok((quiz_type, answers))
}

/// Pick up to `count` random words at `level` and strip them down to questions.
#[instrument(level = "info", skip(store), fields(%level, count))]
pub async fn generate_quiz(store: &dyn WordStore, level: JlptLevel, count: usize) -> Result<Vec<QuizQuestionOut>, AppError> {
  let words = store.sample_by_level(level, count).await?;

  if words.len() < count {
    warn!(target: "quiz", %level, found = words.len(), requested = count, "Could not find enough words for level");
  }
  if words.is_empty() {
    return Err(AppError::NotFound("No words found for the specified criteria.".into()));
  }

  info!(target: "quiz", %level, served = words.len(), "Quiz generated");
  Ok(words.iter().map(to_question).collect())
}

/// Score every answer against the stored word, preserving input order.
/// Ids are resolved with a single batch lookup.
#[instrument(level = "info", skip(store, answers), fields(?quiz_type, answers = answers.len()))]
pub async fn validate_answers(
  store: &dyn WordStore,
  quiz_type: QuizType,
  answers: &[AnswerIn],
) -> Result<Vec<AnswerResultOut>, AppError> {
  let ids: Vec<ObjectId> = answers
    .iter()
    .filter_map(|a| ObjectId::parse_str(&a.word_id).ok())
    .collect::<HashSet<_>>()
    .into_iter()
    .collect();

  let found = if ids.is_empty() { Vec::new() } else { store.find_by_ids(&ids).await? };
  let by_id: HashMap<String, Word> = found
    .into_iter()
    .filter_map(|w| w.id.map(|id| (id.to_hex(), w)))
    .collect();
  debug!(target: "quiz", requested = ids.len(), resolved = by_id.len(), "Answer keys fetched");

  let results: Vec<AnswerResultOut> = answers
    .iter()
    .map(|a| {
      let word = by_id.get(&a.word_id);
      AnswerResultOut {
        word_id: a.word_id.clone(),
        user_answer: a.user_answer.clone(),
        is_correct: word.map_or(false, |w| is_correct(quiz_type, w, &a.user_answer)),
        correct_answer: word.map_or_else(CorrectAnswerOut::sentinel, CorrectAnswerOut::from_word),
      }
    })
    .collect();

  let correct = results.iter().filter(|r| r.is_correct).count();
  info!(target: "quiz", ?quiz_type, total = results.len(), correct, "Answers validated");
  Ok(results)
}

/// Pronunciation: trimmed answer equals `hangeul` exactly.
/// Meaning: trimmed answer equals one of the trimmed comma-separated meanings.
pub fn is_correct(quiz_type: QuizType, word: &Word, user_answer: &str) -> bool {
  let answer = user_answer.trim();
  match quiz_type {
    QuizType::Pronunciation => answer == word.hangeul,
    QuizType::Meaning => word.meanings().any(|m| m == answer),
  }
}
