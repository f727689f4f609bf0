use crate::error::CoreError;
use crate::flags::{ConfigSource, FeatureFlagProvider, FetchPolicy};
use crate::models::{Category, NewTaskData, Task, DEFAULT_CATEGORY_ID};
use crate::storage::{KeyValueStore, SqlitePreferenceStore};
use crate::store::{CategoryStore, TaskStore, DEFAULT_FILTER_DEBOUNCE};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct TidyOptions {
    pub filter_debounce: Duration,
    pub fetch_policy: FetchPolicy,
    pub config_source: Option<Arc<dyn ConfigSource>>,
}

impl Default for TidyOptions {
    fn default() -> Self {
        Self {
            filter_debounce: DEFAULT_FILTER_DEBOUNCE,
            fetch_policy: FetchPolicy::default(),
            config_source: None,
        }
    }
}

/// The application's long-lived state: both stores and the flag provider,
/// built once at startup and handed to every consumer by reference.
pub struct Tidy {
    storage: KeyValueStore,
    categories: Arc<CategoryStore>,
    tasks: TaskStore,
    flags: FeatureFlagProvider,
}

impl Tidy {
    pub async fn open(storage: KeyValueStore, options: TidyOptions) -> Self {
        let categories = Arc::new(CategoryStore::load(storage.clone()).await);
        let tasks = TaskStore::load(storage.clone(), categories.clone(), options.filter_debounce).await;
        let flags = match options.config_source {
            Some(source) => FeatureFlagProvider::new(source, options.fetch_policy),
            None => FeatureFlagProvider::unconfigured(),
        };
        if flags.is_configured() {
            flags.fetch_config().await;
        }

        Self {
            storage,
            categories,
            tasks,
            flags,
        }
    }

    /// Opens a SQLite-backed instance at `db_path`.
    pub async fn open_sqlite(db_path: &str, options: TidyOptions) -> Result<Self, CoreError> {
        let store = SqlitePreferenceStore::open(db_path).await?;
        Ok(Self::open(KeyValueStore::new(Arc::new(store)), options).await)
    }

    pub fn storage(&self) -> &KeyValueStore {
        &self.storage
    }

    pub fn categories(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn flags(&self) -> &FeatureFlagProvider {
        &self.flags
    }

    /// Creates a task, filing it under the default category whenever
    /// categories are switched off.
    pub async fn create_task(&self, mut data: NewTaskData) -> Result<Task, CoreError> {
        if !self.flags.current().enable_categories {
            data.category_id = DEFAULT_CATEGORY_ID.to_string();
        }
        self.tasks.create(data).await
    }

    /// Deletes a category after moving its tasks to the default category.
    ///
    /// The two writes are independent: a crash between them leaves tasks
    /// on the default category and the category still present, never the
    /// other way round. Returns how many tasks moved.
    pub async fn delete_category(&self, id: &str) -> Result<usize, CoreError> {
        if id == DEFAULT_CATEGORY_ID {
            return Err(CoreError::ProtectedEntity(
                "the default category cannot be deleted".to_string(),
            ));
        }
        if !self.categories.exists(id) {
            return Err(CoreError::NotFound(format!("Category not found: {}", id)));
        }

        let moved = self.tasks.reassign_from_deleted_category(id).await?;
        self.categories.delete(id).await?;
        Ok(moved)
    }

    /// Every category with the number of tasks filed under it.
    pub fn category_task_counts(&self) -> Vec<(Category, usize)> {
        let stats = self.tasks.stats();
        self.categories
            .all()
            .into_iter()
            .map(|category| {
                let count = stats.by_category.get(&category.id).copied().unwrap_or(0);
                (category, count)
            })
            .collect()
    }
}
