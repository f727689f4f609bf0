use anyhow::Result;
use comfy_table::{Cell, Table};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tidy_core::app::Tidy;
use tidy_core::models::{NewCategoryData, UpdateCategoryData, PREDEFINED_COLORS};

use crate::cli::{CategoryCommand, CategorySubcommand, DeleteCategoryCommand};
use crate::util::{ensure_categories_enabled, resolve_category};
use crate::views::table::{display_categories, hex_color};

pub async fn category_command(tidy: &Tidy, command: CategoryCommand) -> Result<()> {
    ensure_categories_enabled(tidy)?;

    match command.command {
        CategorySubcommand::Add(add) => {
            let category = tidy
                .categories()
                .create(NewCategoryData {
                    name: add.name,
                    color: add.color,
                })
                .await?;
            println!(
                "{} Created category: {} ({})",
                "✓".green().bold(),
                category.name.bright_white().bold(),
                category.id.yellow()
            );
        }
        CategorySubcommand::List => {
            display_categories(&tidy.category_task_counts());
        }
        CategorySubcommand::Edit(edit) => {
            let category = resolve_category(tidy, &edit.id)?;
            let updated = tidy
                .categories()
                .update(
                    &category.id,
                    UpdateCategoryData {
                        name: edit.name,
                        color: edit.color,
                    },
                )
                .await?;
            println!("Updated category: {}", updated.name);
        }
        CategorySubcommand::Delete(delete) => delete_category(tidy, delete).await?,
        CategorySubcommand::Colors => {
            let mut table = Table::new();
            table.set_header(vec!["Name", "Hex"]);
            for (hex, name) in PREDEFINED_COLORS {
                let cell = match hex_color(hex) {
                    Some(color) => Cell::new(name).fg(color),
                    None => Cell::new(name),
                };
                table.add_row(vec![cell, Cell::new(hex)]);
            }
            println!("{table}");
        }
    }

    Ok(())
}

async fn delete_category(tidy: &Tidy, command: DeleteCategoryCommand) -> Result<()> {
    let category = resolve_category(tidy, &command.id)?;

    if !command.force {
        let affected = tidy
            .tasks()
            .stats()
            .by_category
            .get(&category.id)
            .copied()
            .unwrap_or(0);
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Delete category '{}'? {} task(s) will move to Uncategorized.",
                category.name, affected
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let moved = tidy.delete_category(&category.id).await?;
    println!(
        "Deleted category: {} ({} task(s) moved to Uncategorized)",
        category.name, moved
    );

    Ok(())
}
