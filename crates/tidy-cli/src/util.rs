use anyhow::{anyhow, Result};
use tidy_core::app::Tidy;
use tidy_core::error::CoreError;
use tidy_core::models::{Category, Task};

/// Characters of the id shown in tables: the random suffix.
const SHORT_ID_LEN: usize = 9;

pub fn short_id(id: &str) -> &str {
    let start = id.len().saturating_sub(SHORT_ID_LEN);
    id.get(start..).unwrap_or(id)
}

pub fn resolve_task_id(tidy: &Tidy, short_id: &str) -> Result<String> {
    if tidy.tasks().get(short_id).is_some() {
        return Ok(short_id.to_string());
    }
    if short_id.len() < 3 {
        return Err(anyhow!(CoreError::Validation(
            "Short ID must be at least 3 characters long.".to_string()
        )));
    }

    let tasks: Vec<Task> = tidy
        .tasks()
        .all()
        .into_iter()
        .filter(|t| t.id.ends_with(short_id))
        .collect();
    if tasks.len() == 1 {
        Ok(tasks[0].id.clone())
    } else if tasks.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID '{}'",
            short_id
        ))))
    } else {
        let task_info: Vec<(String, String)> = tasks
            .into_iter()
            .map(|t| (t.id, t.title))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(task_info)))
    }
}

/// Finds a category by exact id, then by case-insensitive name.
pub fn find_category(tidy: &Tidy, id_or_name: &str) -> Option<Category> {
    tidy.categories()
        .get(id_or_name)
        .or_else(|| tidy.categories().find_by_name(id_or_name))
}

pub fn resolve_category(tidy: &Tidy, id_or_name: &str) -> Result<Category> {
    find_category(tidy, id_or_name).ok_or_else(|| {
        anyhow!(CoreError::NotFound(format!(
            "No category found with ID or name '{}'",
            id_or_name
        )))
    })
}

pub fn ensure_categories_enabled(tidy: &Tidy) -> Result<()> {
    if tidy.flags().current().enable_categories {
        Ok(())
    } else {
        Err(anyhow!("Categories are disabled by feature flag"))
    }
}
