//! Category queries

use super::store::Store;
use crate::error::Result;
use crate::model::Category;

/// Read-only facade over the `categories` table
#[derive(Debug, Clone, Copy)]
pub struct CategoryRepository<'a> {
    store: &'a Store,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All categories ordered by id
    pub fn list_all(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .store
            .conn()
            .prepare("SELECT id, type FROM categories ORDER BY id")?;

        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    kind: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }
}
