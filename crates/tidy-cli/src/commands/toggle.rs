use anyhow::Result;
use owo_colors::OwoColorize;
use tidy_core::app::Tidy;

use crate::cli::ToggleCommand;
use crate::util::resolve_task_id;

pub async fn toggle_task(tidy: &Tidy, command: ToggleCommand) -> Result<()> {
    let task_id = resolve_task_id(tidy, &command.id)?;
    let task = tidy.tasks().toggle_completed(&task_id).await?;

    if task.completed {
        println!("{} Completed: {}", "✓".green().bold(), task.title);
    } else {
        println!("{} Reopened: {}", "↺".yellow().bold(), task.title);
    }

    Ok(())
}
