//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use trivia_core::{
    paginate, parse_page, Category, CategoryId, NewQuestion, Question, QuestionId, QuizCategory,
};

use crate::error::ApiError;
use crate::AppState;

// ============================================================================
// Categories
// ============================================================================

/// Response for category list
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// List all categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let store = state.store()?;
    let categories = store.categories().list_all().map_err(ApiError::from_read)?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Response for questions in one category
#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// List every question in a category
pub async fn list_category_questions(
    State(state): State<Arc<AppState>>,
    id: Result<Path<CategoryId>, PathRejection>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::not_found(e.body_text()))?;

    let store = state.store()?;
    let questions = store
        .questions()
        .filter_by_category(id)
        .map_err(ApiError::from_read)?;

    Ok(Json(QuestionListResponse {
        total_questions: questions.len(),
        questions,
    }))
}

// ============================================================================
// Questions
// ============================================================================

/// Query parameters for the question list
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// One page of questions plus every category
#[derive(Debug, Serialize)]
pub struct QuestionsPageResponse {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: Vec<Category>,
}

/// List questions a page at a time.
///
/// A query string that does not decode (e.g. a repeated `page`) reads as
/// page 1.
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionsPageResponse>, ApiError> {
    let page = match query {
        Ok(Query(query)) => query.page,
        Err(e) => {
            tracing::debug!("Ignoring undecodable query: {}", e.body_text());
            None
        }
    };
    let page_number = parse_page(page.as_deref());

    let store = state.store()?;
    let questions = store.questions().list_all().map_err(ApiError::from_read)?;
    let categories = store.categories().list_all().map_err(ApiError::from_read)?;
    drop(store);

    let page = paginate(questions, page_number, state.questions_per_page);
    tracing::debug!(
        "Serving page {} ({} of {} questions)",
        page_number,
        page.items.len(),
        page.total
    );

    Ok(Json(QuestionsPageResponse {
        questions: page.items,
        total_questions: page.total,
        categories,
    }))
}

/// Response for a deleted question
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: QuestionId,
}

/// Delete a question by id
pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    id: Result<Path<QuestionId>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::not_found(e.body_text()))?;

    let store = state.store()?;
    store.questions().delete_by_id(id)?;

    Ok(Json(DeletedResponse { deleted: id }))
}

/// Body of `POST /questions`: a search when `searchTerm` is non-empty,
/// otherwise a new question
#[derive(Debug, Deserialize)]
pub struct QuestionsPostRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    #[serde(flatten)]
    pub question: NewQuestion,
}

/// Response for a created question
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status_code: u16,
}

/// Either search results or a creation acknowledgement
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuestionsPostResponse {
    Search(QuestionListResponse),
    Created(CreatedResponse),
}

/// Search questions or create one
pub async fn search_or_create_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuestionsPostRequest>, JsonRejection>,
) -> Result<Json<QuestionsPostResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let store = state.store()?;

    match request.search_term.as_deref().filter(|term| !term.is_empty()) {
        Some(term) => {
            let questions = store.questions().search(term).map_err(ApiError::from_read)?;
            tracing::debug!("Search {:?} matched {} questions", term, questions.len());
            Ok(Json(QuestionsPostResponse::Search(QuestionListResponse {
                total_questions: questions.len(),
                questions,
            })))
        }
        None => {
            store.questions().insert(&request.question)?;
            Ok(Json(QuestionsPostResponse::Created(CreatedResponse {
                status_code: 200,
            })))
        }
    }
}

// ============================================================================
// Quizzes
// ============================================================================

/// Request for the next quiz question
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<QuestionId>,
    pub quiz_category: QuizCategory,
}

/// Next quiz question; `null` once the quiz has run out
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub question: Option<Question>,
}

/// Pick the next quiz question
pub async fn next_quiz_question(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let store = state.store()?;
    let question = state
        .selector
        .next_question(
            &store.questions(),
            &request.quiz_category,
            &request.previous_questions,
            &mut rand::thread_rng(),
        )
        .map_err(ApiError::from_read)?;

    Ok(Json(QuizResponse { question }))
}

// ============================================================================
// Fallbacks
// ============================================================================

/// Unknown route
pub async fn not_found() -> ApiError {
    ApiError::not_found("no such route")
}

/// Known route, wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::new(axum::http::StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_body_search_term() {
        let request: QuestionsPostRequest =
            serde_json::from_value(serde_json::json!({"searchTerm": "what is"})).unwrap();
        assert_eq!(request.search_term.as_deref(), Some("what is"));
        assert_eq!(request.question, NewQuestion::default());
    }

    #[test]
    fn test_post_body_new_question() {
        let request: QuestionsPostRequest = serde_json::from_value(serde_json::json!({
            "question": "who am i",
            "answer": "i am tunji",
            "difficulty": 1,
            "category": 3
        }))
        .unwrap();
        assert!(request.search_term.is_none());
        assert_eq!(request.question, NewQuestion::new("who am i", "i am tunji", 1, 3));
    }

    #[test]
    fn test_quiz_request_defaults() {
        let request: QuizRequest =
            serde_json::from_value(serde_json::json!({"quiz_category": {"id": 0}})).unwrap();
        assert!(request.previous_questions.is_empty());
        assert!(request.quiz_category.is_all());
    }

    #[test]
    fn test_untagged_post_response_shapes() {
        let created = serde_json::to_value(QuestionsPostResponse::Created(CreatedResponse {
            status_code: 200,
        }))
        .unwrap();
        assert_eq!(created, serde_json::json!({"status_code": 200}));

        let search = serde_json::to_value(QuestionsPostResponse::Search(QuestionListResponse {
            questions: Vec::new(),
            total_questions: 0,
        }))
        .unwrap();
        assert_eq!(search, serde_json::json!({"questions": [], "total_questions": 0}));
    }
}
