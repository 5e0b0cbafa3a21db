//! Quiz question selection
//!
//! Picks the next question for a running quiz, avoiding questions the
//! player has already seen. Running out of questions is a normal outcome
//! (`Ok(None)`); only store failures are errors.
//!
//! Two scopes are supported:
//!
//! - **All categories** (`category == 0`): every stored id minus the asked
//!   ones, one chosen uniformly. Deleted ids never take part in the draw.
//! - **One category**: the category's questions minus the asked ones, one
//!   chosen uniformly.
//!
//! An empty remainder is the only way to get `None`.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{CategoryId, Question, QuestionId};
use crate::persistence::QuestionRepository;

/// Category id meaning "draw from every category"
pub const ALL_CATEGORIES: CategoryId = 0;

/// Category scope of a quiz as sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub id: CategoryId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl QuizCategory {
    pub fn all() -> Self {
        Self {
            id: ALL_CATEGORIES,
            kind: None,
        }
    }

    pub fn is_all(&self) -> bool {
        self.id == ALL_CATEGORIES
    }
}

/// Stateless next-question picker
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizSelector;

impl QuizSelector {
    pub fn new() -> Self {
        Self
    }

    /// Pick a question in `category` whose id is not in `previous`
    pub fn next_question<R: Rng + ?Sized>(
        &self,
        questions: &QuestionRepository<'_>,
        category: &QuizCategory,
        previous: &[QuestionId],
        rng: &mut R,
    ) -> Result<Option<Question>> {
        let asked: HashSet<QuestionId> = previous.iter().copied().collect();

        let picked = if category.is_all() {
            Self::draw_any(questions, &asked, rng)?
        } else {
            Self::draw_from_category(questions, category.id, &asked, rng)?
        };

        match &picked {
            Some(q) => tracing::debug!("Quiz picked question {} (category {})", q.id, category.id),
            None => tracing::debug!(
                "Quiz exhausted for category {} after {} asked",
                category.id,
                asked.len()
            ),
        }
        Ok(picked)
    }

    fn draw_any<R: Rng + ?Sized>(
        questions: &QuestionRepository<'_>,
        asked: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> Result<Option<Question>> {
        let candidates: Vec<QuestionId> = questions
            .all_ids()?
            .into_iter()
            .filter(|id| !asked.contains(id))
            .collect();

        match candidates.choose(rng) {
            Some(&id) => questions.get_by_id(id),
            None => Ok(None),
        }
    }

    fn draw_from_category<R: Rng + ?Sized>(
        questions: &QuestionRepository<'_>,
        category: CategoryId,
        asked: &HashSet<QuestionId>,
        rng: &mut R,
    ) -> Result<Option<Question>> {
        let candidates: Vec<Question> = questions
            .filter_by_category(category)?
            .into_iter()
            .filter(|q| !asked.contains(&q.id))
            .collect();

        Ok(candidates.choose(rng).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::NewQuestion;
    use crate::persistence::Store;

    /// Store holding ids 1, 2, 3 and 5 (4 deleted)
    fn gapped_store() -> Store {
        let store = Store::in_memory().unwrap();
        let repo = store.questions();
        for n in 1..=5 {
            repo.insert(&NewQuestion::new(format!("Question {n}?"), "answer", 1, 1 + n % 2))
                .unwrap();
        }
        repo.delete_by_id(4).unwrap();
        store
    }

    fn category(id: CategoryId) -> QuizCategory {
        QuizCategory { id, kind: None }
    }

    #[test]
    fn test_all_categories_reaches_every_id() {
        let store = gapped_store();
        let selector = QuizSelector::default();
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = BTreeSet::new();
        for _ in 0..200 {
            let q = selector
                .next_question(&store.questions(), &QuizCategory::all(), &[], &mut rng)
                .unwrap()
                .expect("questions remain");
            seen.insert(q.id);
        }
        // Max id included
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_all_categories_skips_every_asked_id() {
        let store = gapped_store();
        let selector = QuizSelector::default();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let q = selector
                .next_question(&store.questions(), &QuizCategory::all(), &[5, 1, 3], &mut rng)
                .unwrap()
                .unwrap();
            assert_eq!(q.id, 2);
        }
    }

    #[test]
    fn test_all_categories_exhausted_terminates() {
        let store = gapped_store();
        let selector = QuizSelector::default();
        let mut rng = StdRng::seed_from_u64(3);

        let picked = selector
            .next_question(&store.questions(), &QuizCategory::all(), &[1, 2, 3, 5], &mut rng)
            .unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn test_all_categories_empty_store() {
        let store = Store::in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = QuizSelector::default()
            .next_question(&store.questions(), &QuizCategory::all(), &[], &mut rng)
            .unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn test_all_categories_sparse_ids() {
        let store = Store::in_memory().unwrap();
        let repo = store.questions();
        for n in 1..=1000 {
            repo.insert(&NewQuestion::new(format!("Question {n}?"), "answer", 1, 1))
                .unwrap();
        }
        for id in 1..1000 {
            repo.delete_by_id(id).unwrap();
        }

        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let q = QuizSelector::new()
                .next_question(&repo, &QuizCategory::all(), &[], &mut rng)
                .unwrap()
                .expect("question 1000 remains");
            assert_eq!(q.id, 1000);
        }
    }

    #[test]
    fn test_all_categories_mostly_asked() {
        let store = Store::in_memory().unwrap();
        let repo = store.questions();
        for n in 1..=1000 {
            repo.insert(&NewQuestion::new(format!("Question {n}?"), "answer", 1, 1))
                .unwrap();
        }
        let asked: Vec<QuestionId> = (1..=995).collect();

        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            let q = QuizSelector::new()
                .next_question(&repo, &QuizCategory::all(), &asked, &mut rng)
                .unwrap()
                .expect("five questions remain");
            assert!((996..=1000).contains(&q.id));
        }
    }

    #[test]
    fn test_category_scope_stays_in_category() {
        let store = gapped_store();
        let selector = QuizSelector::default();
        let mut rng = StdRng::seed_from_u64(9);

        // Category 2 holds ids 1, 3 and 5
        for _ in 0..50 {
            let q = selector
                .next_question(&store.questions(), &category(2), &[], &mut rng)
                .unwrap()
                .unwrap();
            assert_eq!(q.category, 2);
        }
    }

    #[test]
    fn test_category_scope_rejects_any_asked_position() {
        let store = gapped_store();
        let selector = QuizSelector::default();
        let mut rng = StdRng::seed_from_u64(13);

        for _ in 0..50 {
            let q = selector
                .next_question(&store.questions(), &category(2), &[9, 5, 1], &mut rng)
                .unwrap()
                .unwrap();
            assert_eq!(q.id, 3);
        }
    }

    #[test]
    fn test_single_question_category_already_asked() {
        let store = Store::in_memory().unwrap();
        let id = store
            .questions()
            .insert(&NewQuestion::new("Only one?", "yes", 1, 6))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let picked = QuizSelector::default()
            .next_question(&store.questions(), &category(6), &[id], &mut rng)
            .unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn test_empty_category() {
        let store = gapped_store();
        let mut rng = StdRng::seed_from_u64(4);
        let picked = QuizSelector::default()
            .next_question(&store.questions(), &category(4), &[], &mut rng)
            .unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn test_quiz_category_json() {
        let parsed: QuizCategory =
            serde_json::from_value(serde_json::json!({"type": "click", "id": 0})).unwrap();
        assert!(parsed.is_all());
        assert_eq!(parsed.kind.as_deref(), Some("click"));

        let bare: QuizCategory = serde_json::from_value(serde_json::json!({"id": 3})).unwrap();
        assert_eq!(bare, category(3));
    }
}
