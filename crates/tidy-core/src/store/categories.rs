use crate::error::CoreError;
use crate::ids::{generate_id, IdKind};
use crate::models::{Category, NewCategoryData, UpdateCategoryData, DEFAULT_CATEGORY_ID};
use crate::storage::{KeyValueStore, CATEGORIES_KEY};
use chrono::Utc;
use tokio::sync::watch;

/// Owner of the category collection.
///
/// The collection always contains the default category. Every mutation
/// replaces the in-memory collection and notifies subscribers first, then
/// writes the whole collection through to storage. A failed write is
/// returned to the caller but not rolled back in memory.
pub struct CategoryStore {
    storage: KeyValueStore,
    categories: watch::Sender<Vec<Category>>,
}

impl CategoryStore {
    /// Builds the store and loads the persisted collection.
    pub async fn load(storage: KeyValueStore) -> Self {
        let (categories, _) = watch::channel(vec![Category::default_category()]);
        let store = Self { storage, categories };
        store.initialize().await;
        store
    }

    async fn initialize(&self) {
        match self.storage.get_records::<Category>(CATEGORIES_KEY).await {
            Some(mut categories) if !categories.is_empty() => {
                if !categories.iter().any(Category::is_default) {
                    categories.insert(0, Category::default_category());
                }
                tracing::info!(count = categories.len(), "loaded categories");
                self.categories.send_replace(categories);
            }
            _ => {
                self.categories.send_replace(vec![Category::default_category()]);
                if let Err(e) = self.persist().await {
                    tracing::warn!(error = %e, "could not persist initial categories");
                }
            }
        }
    }

    async fn persist(&self) -> Result<(), CoreError> {
        let snapshot = self.categories.borrow().clone();
        self.storage.set(CATEGORIES_KEY, &snapshot).await
    }

    pub async fn create(&self, data: NewCategoryData) -> Result<Category, CoreError> {
        let name = data.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Category name cannot be empty".to_string()));
        }

        let category = Category {
            id: generate_id(IdKind::Category, |id| self.exists(id)),
            name: name.to_string(),
            color: data.color,
            created_at: Utc::now(),
        };

        self.categories.send_modify(|categories| categories.push(category.clone()));
        self.persist().await?;

        Ok(category)
    }

    pub async fn update(&self, id: &str, data: UpdateCategoryData) -> Result<Category, CoreError> {
        if id == DEFAULT_CATEGORY_ID {
            return Err(CoreError::ProtectedEntity(
                "the default category cannot be edited".to_string(),
            ));
        }

        let name = match data.name {
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(CoreError::Validation("Category name cannot be empty".to_string()));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let mut updated = self
            .get(id)
            .ok_or_else(|| CoreError::NotFound(format!("Category not found: {}", id)))?;
        if let Some(name) = name {
            updated.name = name;
        }
        if let Some(color) = data.color {
            updated.color = color;
        }

        self.categories.send_modify(|categories| {
            if let Some(slot) = categories.iter_mut().find(|c| c.id == id) {
                *slot = updated.clone();
            }
        });
        self.persist().await?;

        Ok(updated)
    }

    /// Removes a category. Tasks still pointing at it must be reassigned
    /// beforehand; this store does not know about tasks.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        if id == DEFAULT_CATEGORY_ID {
            return Err(CoreError::ProtectedEntity(
                "the default category cannot be deleted".to_string(),
            ));
        }

        self.categories.send_modify(|categories| categories.retain(|c| c.id != id));
        self.persist().await
    }

    pub fn all(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }

    pub fn get(&self, id: &str) -> Option<Category> {
        self.categories.borrow().iter().find(|c| c.id == id).cloned()
    }

    /// Case-insensitive lookup by name.
    pub fn find_by_name(&self, name: &str) -> Option<Category> {
        let name = name.trim().to_lowercase();
        self.categories
            .borrow()
            .iter()
            .find(|c| c.name.to_lowercase() == name)
            .cloned()
    }

    pub fn exists(&self, id: &str) -> bool {
        self.categories.borrow().iter().any(|c| c.id == id)
    }

    /// Number of user categories, the default one excluded.
    pub fn count(&self) -> usize {
        self.categories.borrow().iter().filter(|c| !c.is_default()).count()
    }

    /// A receiver that sees the current collection immediately and every
    /// later replacement.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Category>> {
        self.categories.subscribe()
    }
}
