use anyhow::Result;
use tidy_core::app::Tidy;
use tidy_core::models::UpdateTaskData;

use crate::cli::EditCommand;
use crate::util::{ensure_categories_enabled, find_category, resolve_task_id, short_id};

pub async fn edit_task(tidy: &Tidy, command: EditCommand) -> Result<()> {
    let task_id = resolve_task_id(tidy, &command.id)?;

    let category_id = match command.category {
        Some(input) => {
            ensure_categories_enabled(tidy)?;
            Some(find_category(tidy, &input).map(|c| c.id).unwrap_or(input))
        }
        None => None,
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description: command.description,
        completed: None,
        category_id,
    };

    let updated_task = tidy.tasks().update(&task_id, update_data).await?;
    println!("Updated task with ID: {}", short_id(&updated_task.id));

    Ok(())
}
