use anyhow::Result;
use dialoguer::Confirm;
use tidy_core::app::Tidy;
use tidy_core::error::CoreError;

use crate::cli::DeleteCommand;
use crate::util::resolve_task_id;

pub async fn delete_task(tidy: &Tidy, command: DeleteCommand) -> Result<()> {
    let task_id = resolve_task_id(tidy, &command.id)?;
    let task = tidy
        .tasks()
        .get(&task_id)
        .ok_or_else(|| CoreError::NotFound(format!("Task with ID '{}' not found.", task_id)))?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete task '{}'?",
                task.title
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    tidy.tasks().delete(&task_id).await?;
    println!("Deleted task: {}", task.title);

    Ok(())
}
