//! Question and category records

use serde::{Deserialize, Serialize};

/// Store-assigned question identifier
pub type QuestionId = i64;

/// Category identifier
pub type CategoryId = i64;

/// A trivia question as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

/// A question category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Fields for inserting a question.
///
/// Every field is optional here; the store's NOT NULL constraints decide
/// whether the row is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<i64>,
    pub category: Option<CategoryId>,
}

impl NewQuestion {
    /// Build a fully populated question
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        difficulty: i64,
        category: CategoryId,
    ) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            difficulty: Some(difficulty),
            category: Some(category),
        }
    }
}
