use crate::error::CoreError;
use crate::filter::apply_filter;
use crate::ids::{generate_id, IdKind};
use crate::models::{
    NewTaskData, Task, TaskFilter, TaskFilterUpdate, TaskStats, UpdateTaskData,
    DEFAULT_CATEGORY_ID,
};
use crate::storage::{KeyValueStore, TASKS_KEY};
use crate::store::CategoryStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

/// Delay applied to filter changes before the filtered view is recomputed.
pub const DEFAULT_FILTER_DEBOUNCE: Duration = Duration::from_millis(300);

/// Owner of the task collection and of the session's filter.
///
/// Three channels are exposed: the raw collection, the current filter, and
/// a filtered view derived from both by a background worker. Mutations follow
/// the same contract as [`CategoryStore`]: update and notify in memory, then
/// write the whole collection; a failed write is returned, not rolled back.
pub struct TaskStore {
    storage: KeyValueStore,
    categories: Arc<CategoryStore>,
    tasks: watch::Sender<Vec<Task>>,
    filter: watch::Sender<TaskFilter>,
    filtered: watch::Receiver<Vec<Task>>,
}

impl TaskStore {
    /// Builds the store, loads persisted tasks and starts the filtered-view
    /// worker on the current runtime.
    pub async fn load(
        storage: KeyValueStore,
        categories: Arc<CategoryStore>,
        debounce: Duration,
    ) -> Self {
        let persisted = storage.get_records::<Task>(TASKS_KEY).await.unwrap_or_default();
        tracing::info!(count = persisted.len(), "loaded tasks");

        let (tasks, tasks_rx) = watch::channel(persisted);
        let (filter, filter_rx) = watch::channel(TaskFilter::default());
        let (filtered_tx, filtered) = watch::channel(Vec::new());

        tokio::spawn(run_filtered_view(tasks_rx, filter_rx, filtered_tx, debounce));

        Self {
            storage,
            categories,
            tasks,
            filter,
            filtered,
        }
    }

    async fn persist(&self) -> Result<(), CoreError> {
        let snapshot = self.tasks.borrow().clone();
        self.storage.set(TASKS_KEY, &snapshot).await
    }

    fn resolve_category(&self, category_id: String) -> String {
        if self.categories.exists(&category_id) {
            category_id
        } else {
            tracing::debug!(category_id = %category_id, "unknown category, using default");
            DEFAULT_CATEGORY_ID.to_string()
        }
    }

    pub async fn create(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("Task title cannot be empty".to_string()));
        }

        let now = Utc::now();
        let task = Task {
            id: generate_id(IdKind::Task, |id| self.contains(id)),
            title: title.to_string(),
            description: data.description.trim().to_string(),
            completed: false,
            category_id: self.resolve_category(data.category_id),
            created_at: now,
            updated_at: now,
        };

        self.tasks.send_modify(|tasks| tasks.push(task.clone()));
        self.persist().await?;

        Ok(task)
    }

    /// Applies the provided fields and refreshes `updated_at`.
    pub async fn update(&self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut updated = self
            .get(id)
            .ok_or_else(|| CoreError::NotFound(format!("Task not found: {}", id)))?;

        if let Some(title) = data.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(CoreError::Validation("Task title cannot be empty".to_string()));
            }
            updated.title = title.to_string();
        }
        if let Some(description) = data.description {
            updated.description = description.trim().to_string();
        }
        if let Some(completed) = data.completed {
            updated.completed = completed;
        }
        if let Some(category_id) = data.category_id {
            updated.category_id = self.resolve_category(category_id);
        }
        updated.updated_at = Utc::now();

        self.tasks.send_modify(|tasks| {
            if let Some(slot) = tasks.iter_mut().find(|t| t.id == id) {
                *slot = updated.clone();
            }
        });
        self.persist().await?;

        Ok(updated)
    }

    pub async fn toggle_completed(&self, id: &str) -> Result<Task, CoreError> {
        let current = self
            .get(id)
            .ok_or_else(|| CoreError::NotFound(format!("Task not found: {}", id)))?;

        self.update(
            id,
            UpdateTaskData {
                completed: Some(!current.completed),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.tasks.send_modify(|tasks| tasks.retain(|t| t.id != id));
        self.persist().await
    }

    /// Moves every task of `category_id` to the default category in a single
    /// write. Returns how many tasks moved.
    pub async fn reassign_from_deleted_category(&self, category_id: &str) -> Result<usize, CoreError> {
        let now = Utc::now();
        let mut moved = 0;
        self.tasks.send_modify(|tasks| {
            for task in tasks.iter_mut().filter(|t| t.category_id == category_id) {
                task.category_id = DEFAULT_CATEGORY_ID.to_string();
                task.updated_at = now;
                moved += 1;
            }
        });
        self.persist().await?;

        tracing::debug!(category_id, moved, "reassigned tasks to default category");
        Ok(moved)
    }

    /// Drops all completed tasks. Returns how many were removed.
    pub async fn clear_completed(&self) -> Result<usize, CoreError> {
        let mut removed = 0;
        self.tasks.send_modify(|tasks| {
            let before = tasks.len();
            tasks.retain(|t| !t.completed);
            removed = before - tasks.len();
        });
        self.persist().await?;
        Ok(removed)
    }

    /// Merges `update` into the current filter. The filtered view picks it
    /// up after the debounce window.
    pub fn update_filter(&self, update: TaskFilterUpdate) {
        self.filter.send_modify(|filter| filter.merge(update));
    }

    pub fn clear_filters(&self) {
        self.filter.send_replace(TaskFilter::default());
    }

    pub fn stats(&self) -> TaskStats {
        let tasks = self.tasks.borrow();
        let mut stats = TaskStats {
            total: tasks.len(),
            ..Default::default()
        };
        for task in tasks.iter() {
            if task.completed {
                stats.completed += 1;
            } else {
                stats.pending += 1;
            }
            *stats.by_category.entry(task.category_id.clone()).or_insert(0) += 1;
        }
        stats
    }

    pub fn all(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.tasks.borrow().iter().find(|t| t.id == id).cloned()
    }

    fn contains(&self, id: &str) -> bool {
        self.tasks.borrow().iter().any(|t| t.id == id)
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter.borrow().clone()
    }

    /// The current filter applied to the current collection, without waiting
    /// for the debounced view.
    pub fn filtered_now(&self) -> Vec<Task> {
        let filter = self.filter();
        apply_filter(&self.tasks.borrow(), &filter)
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks.subscribe()
    }

    pub fn subscribe_filter(&self) -> watch::Receiver<TaskFilter> {
        self.filter.subscribe()
    }

    /// The derived view. Empty until the first filter value has settled.
    pub fn subscribe_filtered(&self) -> watch::Receiver<Vec<Task>> {
        self.filtered.clone()
    }
}

/// Recomputes the filtered view. Task changes apply immediately with the
/// last settled filter; filter changes settle once no newer change arrives
/// within `debounce`. Exits when the store is dropped.
async fn run_filtered_view(
    mut tasks_rx: watch::Receiver<Vec<Task>>,
    mut filter_rx: watch::Receiver<TaskFilter>,
    out: watch::Sender<Vec<Task>>,
    debounce: Duration,
) {
    let mut settled: Option<TaskFilter> = None;
    let mut deadline = Some(Instant::now() + debounce);

    loop {
        tokio::select! {
            changed = tasks_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let tasks = tasks_rx.borrow_and_update().clone();
                if let Some(filter) = &settled {
                    out.send_replace(apply_filter(&tasks, filter));
                }
            }
            changed = filter_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                filter_rx.borrow_and_update();
                deadline = Some(Instant::now() + debounce);
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                let filter = filter_rx.borrow_and_update().clone();
                let tasks = tasks_rx.borrow_and_update().clone();
                out.send_replace(apply_filter(&tasks, &filter));
                settled = Some(filter);
            }
        }
    }
}
