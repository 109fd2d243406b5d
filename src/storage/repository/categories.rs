// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 OpenCourse

//! Category repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStore, StorageError, StorageResult};

/// Catalog category stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredCategory {
    /// Unique category identifier (UUID)
    pub id: String,
    /// Category title
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for category operations on the document store.
pub struct CategoryRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn exists(&self, category_id: &str) -> bool {
        self.store.exists(self.store.paths().category(category_id))
    }

    pub fn get(&self, category_id: &str) -> StorageResult<StoredCategory> {
        let path = self.store.paths().category(category_id);
        if !self.store.exists(&path) {
            return Err(StorageError::NotFound(format!("Category {category_id}")));
        }
        self.store.read_json(path)
    }

    pub fn create(&self, category: &StoredCategory) -> StorageResult<()> {
        if self.exists(&category.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Category {}",
                category.id
            )));
        }

        self.store
            .write_json(self.store.paths().category(&category.id), category)
    }

    pub fn list_all(&self) -> StorageResult<Vec<StoredCategory>> {
        let ids = self
            .store
            .list_files(self.store.paths().categories_dir(), "json")?;

        let mut categories = Vec::new();
        for id in ids {
            if let Ok(category) = self.get(&id) {
                categories.push(category);
            }
        }
        categories.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use tempfile::TempDir;

    fn test_store() -> (DocumentStore, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(dir.path()));
        store.initialize().expect("initialize");
        (store, dir)
    }

    #[test]
    fn create_get_and_list() {
        let (store, _dir) = test_store();
        let repo = CategoryRepository::new(&store);

        let category = StoredCategory {
            id: "cat-1".to_string(),
            title: "Programming".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        repo.create(&category).unwrap();

        assert_eq!(repo.get("cat-1").unwrap().title, "Programming");
        assert_eq!(repo.list_all().unwrap().len(), 1);

        let result = repo.create(&category);
        assert!(matches!(result, Err(StorageError::AlreadyExists(_))));
    }
}
