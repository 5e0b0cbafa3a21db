//! Question queries and mutations

use rusqlite::OptionalExtension;

use super::store::{Store, LOWER_FN};
use crate::error::{Result, TriviaError};
use crate::model::{CategoryId, NewQuestion, Question, QuestionId};

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// Query/mutation facade over the `questions` table
#[derive(Debug, Clone, Copy)]
pub struct QuestionRepository<'a> {
    store: &'a Store,
}

impl<'a> QuestionRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All questions ordered by id
    pub fn list_all(&self) -> Result<Vec<Question>> {
        self.query(
            &format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id"),
            [],
        )
    }

    /// Questions whose category equals `category`
    pub fn filter_by_category(&self, category: CategoryId) -> Result<Vec<Question>> {
        self.query(
            &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE category = ?1 ORDER BY id"),
            [category],
        )
    }

    /// Questions whose text contains `term`, ignoring case.
    ///
    /// Case folding is Unicode-aware and `term` matches literally.
    pub fn search(&self, term: &str) -> Result<Vec<Question>> {
        tracing::debug!("Searching questions for {:?}", term);
        self.query(
            &format!(
                "SELECT {QUESTION_COLUMNS} FROM questions WHERE instr({LOWER_FN}(question), ?1) > 0 ORDER BY id"
            ),
            [term.to_lowercase()],
        )
    }

    /// Insert a question and return its new id
    pub fn insert(&self, new: &NewQuestion) -> Result<QuestionId> {
        let conn = self.store.conn();
        conn.execute(
            "INSERT INTO questions (question, answer, difficulty, category) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![new.question, new.answer, new.difficulty, new.category],
        )?;
        let id = conn.last_insert_rowid();
        tracing::info!("Inserted question {}", id);
        Ok(id)
    }

    /// Delete the question with `id`, failing with `NotFound` if absent
    pub fn delete_by_id(&self, id: QuestionId) -> Result<()> {
        let removed = self
            .store
            .conn()
            .execute("DELETE FROM questions WHERE id = ?1", [id])?;

        if removed == 0 {
            return Err(TriviaError::NotFound(format!("question {id}")));
        }
        tracing::info!("Deleted question {}", id);
        Ok(())
    }

    /// Get a question by id
    pub fn get_by_id(&self, id: QuestionId) -> Result<Option<Question>> {
        let question = self
            .store
            .conn()
            .query_row(
                &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"),
                [id],
                Self::row_to_question,
            )
            .optional()?;
        Ok(question)
    }

    /// Greatest id present, `None` for an empty table
    pub fn max_id(&self) -> Result<Option<QuestionId>> {
        let max = self
            .store
            .conn()
            .query_row("SELECT MAX(id) FROM questions", [], |row| row.get(0))?;
        Ok(max)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .store
            .conn()
            .query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        row_count(count)
    }

    /// Every stored id, ascending
    pub fn all_ids(&self) -> Result<Vec<QuestionId>> {
        let mut stmt = self.store.conn().prepare("SELECT id FROM questions ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Question>> {
        let mut stmt = self.store.conn().prepare(sql)?;
        let questions = stmt
            .query_map(params, Self::row_to_question)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(questions)
    }

    fn row_to_question(row: &rusqlite::Row) -> rusqlite::Result<Question> {
        Ok(Question {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            category: row.get(3)?,
            difficulty: row.get(4)?,
        })
    }
}

fn row_count(count: i64) -> Result<usize> {
    usize::try_from(count).map_err(|e| TriviaError::Internal(format!("row count {count}: {e}")))
}
