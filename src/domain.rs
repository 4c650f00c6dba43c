//! Domain models: the word record and the small enums around it (level, part of speech, quiz type).

use std::fmt;
use std::str::FromStr;

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// JLPT band. N1 is the hardest, N5 the easiest.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum JlptLevel {
  N1,
  N2,
  N3,
  N4,
  N5,
}

impl JlptLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      JlptLevel::N1 => "N1",
      JlptLevel::N2 => "N2",
      JlptLevel::N3 => "N3",
      JlptLevel::N4 => "N4",
      JlptLevel::N5 => "N5",
    }
  }
}

impl fmt::Display for JlptLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for JlptLevel {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "N1" => Ok(JlptLevel::N1),
      "N2" => Ok(JlptLevel::N2),
      "N3" => Ok(JlptLevel::N3),
      "N4" => Ok(JlptLevel::N4),
      "N5" => Ok(JlptLevel::N5),
      _ => Err(()),
    }
  }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
  Noun,
  Verb,
  Adjective,
  Adverb,
}

impl PartOfSpeech {
  pub fn as_str(&self) -> &'static str {
    match self {
      PartOfSpeech::Noun => "noun",
      PartOfSpeech::Verb => "verb",
      PartOfSpeech::Adjective => "adjective",
      PartOfSpeech::Adverb => "adverb",
    }
  }
}

/// Which field of the word the user is asked to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizType {
  /// Answer key = `hangeul`.
  Pronunciation,
  /// Answer key = any comma-separated segment of `meaning`.
  Meaning,
}

impl FromStr for QuizType {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pronunciation" => Ok(QuizType::Pronunciation),
      "meaning" => Ok(QuizType::Meaning),
      _ => Err(()),
    }
  }
}

/// Vocabulary record as stored in the `words` collection and as read from seed files.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Word {
  #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
  pub id: Option<ObjectId>,
  pub word: String,
  pub reading: String,
  pub meaning: String,
  pub hangeul: String,
  pub level: JlptLevel,
  pub part_of_speech: PartOfSpeech,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime>,
}

impl Word {
  /// Trim the fields the collection stores trimmed (`word`, `reading`, `meaning`).
  pub fn normalize(mut self) -> Self {
    self.word = self.word.trim().to_string();
    self.reading = self.reading.trim().to_string();
    self.meaning = self.meaning.trim().to_string();
    self
  }

  /// Required-field check applied before any write. Enum fields are already
  /// enforced by deserialization.
  pub fn validate(&self) -> Result<(), String> {
    let required = [
      ("word", &self.word),
      ("reading", &self.reading),
      ("meaning", &self.meaning),
      ("hangeul", &self.hangeul),
    ];
    for (name, value) in required {
      if value.trim().is_empty() {
        return Err(format!("{name} is required (word: {:?})", self.word));
      }
    }
    Ok(())
  }

  /// The individual accepted translations in `meaning`.
  pub fn meanings(&self) -> impl Iterator<Item = &str> {
    self.meaning.split(',').map(str::trim)
  }
}

#[cfg(test)]
pub(crate) fn sample_word(word: &str, level: JlptLevel, hangeul: &str, meaning: &str) -> Word {
  Word {
    id: None,
    word: word.into(),
    reading: "よみ".into(),
    meaning: meaning.into(),
    hangeul: hangeul.into(),
    level,
    part_of_speech: PartOfSpeech::Noun,
    created_at: None,
    updated_at: None,
  }
}
