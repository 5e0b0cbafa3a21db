//! Persistence layer for trivia data
//!
//! Provides a SQLite-backed store with repositories for questions and categories.

mod categories;
mod questions;
mod schema;
mod store;

pub use categories::CategoryRepository;
pub use questions::QuestionRepository;
pub use schema::{Schema, SCHEMA_VERSION};
pub use store::Store;
