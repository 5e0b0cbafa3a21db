//! Trivia Core - questions, categories, and quiz selection
//!
//! This crate provides the domain layer behind the trivia HTTP API:
//!
//! - **Persistence**: SQLite store handle with question and category repositories
//! - **Pagination**: 1-indexed fixed-size pages with the full collection size
//! - **Quiz**: next-question selection that never repeats an asked question
//! - **Config**: listener, database, paging, and quiz settings
//!
//! # Example
//!
//! ```
//! use trivia_core::{NewQuestion, QuizCategory, QuizSelector, Store};
//!
//! let store = Store::in_memory()?;
//! let id = store
//!     .questions()
//!     .insert(&NewQuestion::new("Who discovered penicillin?", "Alexander Fleming", 3, 1))?;
//!
//! let next = QuizSelector::default().next_question(
//!     &store.questions(),
//!     &QuizCategory { id: 1, kind: None },
//!     &[id],
//!     &mut rand::thread_rng(),
//! )?;
//! assert!(next.is_none());
//! # Ok::<(), trivia_core::TriviaError>(())
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod pagination;
pub mod persistence;
pub mod quiz;

pub use config::{ConfigError, TriviaConfig};
pub use error::{PersistenceError, Result, TriviaError};
pub use model::{Category, CategoryId, NewQuestion, Question, QuestionId};
pub use pagination::{paginate, parse_page, Page, QUESTIONS_PER_PAGE};
pub use persistence::{CategoryRepository, QuestionRepository, Store};
pub use quiz::{QuizCategory, QuizSelector, ALL_CATEGORIES};

/// Returns the version of trivia-core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
