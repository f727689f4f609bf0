use crate::models::{Task, TaskFilter};

/// Projects `tasks` through `filter`, newest first.
///
/// Category match, then case-insensitive substring search over title and
/// description (skipped when the search text is blank), then completed tasks
/// are dropped if `show_completed` is explicitly `false`.
pub fn apply_filter(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let needle = filter
        .search_text
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let hide_completed = filter.show_completed == Some(false);

    let mut filtered: Vec<Task> = tasks
        .iter()
        .filter(|task| {
            filter
                .category_id
                .as_deref()
                .map_or(true, |category_id| task.category_id == category_id)
        })
        .filter(|task| {
            needle.as_deref().map_or(true, |needle| {
                task.title.to_lowercase().contains(needle)
                    || task.description.to_lowercase().contains(needle)
            })
        })
        .filter(|task| !(hide_completed && task.completed))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered
}
