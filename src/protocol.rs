//! Public request/response structs for the HTTP endpoints (serde ready).
//! Field names follow the JSON the web client already speaks (camelCase, `_id`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Word;

/// Placeholder reported for correct-answer fields when a word id does not resolve.
pub const SENTINEL: &str = "N/A";

/// Raw generate body. Fields stay loosely typed so validation can report
/// "missing" and "not a positive number" distinctly.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateIn {
    #[serde(default)]
    pub level: Option<Value>,
    #[serde(default)]
    pub count: Option<Value>,
}

/// One quiz question: only the id and surface form, never the answer fields.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestionOut {
    #[serde(rename = "_id")]
    pub id: String,
    pub word: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ValidateIn {
    #[serde(default, rename = "quizType")]
    pub quiz_type: Option<Value>,
    #[serde(default)]
    pub answers: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerIn {
    pub word_id: String,
    pub user_answer: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResultOut {
    pub word_id: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub correct_answer: CorrectAnswerOut,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorrectAnswerOut {
    pub word: String,
    pub reading: String,
    pub meaning: String,
    pub hangeul: String,
    pub part_of_speech: String,
}

impl CorrectAnswerOut {
    pub fn from_word(w: &Word) -> Self {
        Self {
            word: w.word.clone(),
            reading: w.reading.clone(),
            meaning: w.meaning.clone(),
            hangeul: w.hangeul.clone(),
            part_of_speech: w.part_of_speech.as_str().to_string(),
        }
    }

    pub fn sentinel() -> Self {
        Self {
            word: SENTINEL.into(),
            reading: SENTINEL.into(),
            meaning: SENTINEL.into(),
            hangeul: SENTINEL.into(),
            part_of_speech: SENTINEL.into(),
        }
    }
}

/// Convert a stored word into the public question DTO.
pub fn to_question(w: &Word) -> QuizQuestionOut {
    QuizQuestionOut {
        id: w.id.map(|id| id.to_hex()).unwrap_or_default(),
        word: w.word.clone(),
    }
}
