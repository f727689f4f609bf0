use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use tidy_core::app::Tidy;
use tidy_core::models::{NewTaskData, DEFAULT_CATEGORY_ID};

use crate::cli::AddCommand;
use crate::util::{find_category, short_id};

pub async fn add_task(tidy: &Tidy, command: AddCommand) -> Result<()> {
    let category_id = match command.category.as_deref() {
        Some(input) => find_category(tidy, input)
            .map(|c| c.id)
            .unwrap_or_else(|| input.to_string()),
        None => DEFAULT_CATEGORY_ID.to_string(),
    };

    let added_task = tidy
        .create_task(NewTaskData {
            title: command.title,
            description: command.description,
            category_id,
        })
        .await?;

    let category_name = tidy
        .categories()
        .get(&added_task.category_id)
        .map(|c| c.name)
        .unwrap_or_else(|| added_task.category_id.clone());

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        added_task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        short_id(&added_task.id).yellow()
    );
    println!("  {} Category: {}", "→".style(info_style), category_name);

    Ok(())
}
