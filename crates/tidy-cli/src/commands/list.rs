use anyhow::Result;
use tidy_core::app::Tidy;
use tidy_core::models::{TaskFilterUpdate, DEFAULT_CATEGORY_ID};

use crate::cli::ListCommand;
use crate::util::resolve_category;
use crate::views::table::{display_tasks, ViewTask};

pub async fn list_tasks(tidy: &Tidy, command: ListCommand) -> Result<()> {
    let category_id = match command.category.as_deref() {
        Some(input) => Some(resolve_category(tidy, input)?.id),
        None => None,
    };

    tidy.tasks().update_filter(TaskFilterUpdate {
        category_id: Some(category_id),
        search_text: Some(command.search),
        show_completed: Some(Some(!command.hide_completed)),
    });

    let categories = tidy.categories().all();
    let view_tasks: Vec<ViewTask> = tidy
        .tasks()
        .filtered_now()
        .into_iter()
        .map(|task| {
            let category = categories
                .iter()
                .find(|c| c.id == task.category_id)
                .or_else(|| categories.iter().find(|c| c.id == DEFAULT_CATEGORY_ID))
                .cloned();
            ViewTask { task, category }
        })
        .collect();

    display_tasks(&view_tasks, tidy.flags().current().enable_dark_mode);

    Ok(())
}
