use anyhow::Result;
use dialoguer::Confirm;
use tidy_core::app::Tidy;

use crate::cli::ClearCompletedCommand;

pub async fn clear_completed(tidy: &Tidy, command: ClearCompletedCommand) -> Result<()> {
    let completed = tidy.tasks().stats().completed;
    if completed == 0 {
        println!("No completed tasks to clear.");
        return Ok(());
    }

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!("Delete {} completed task(s)?", completed))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Clear cancelled.");
            return Ok(());
        }
    }

    let removed = tidy.tasks().clear_completed().await?;
    println!("Cleared {} completed task(s).", removed);

    Ok(())
}
