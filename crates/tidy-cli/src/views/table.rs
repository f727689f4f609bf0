use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use tidy_core::models::{color_name, Category, TaskStats, Task};

use crate::util::short_id;

/// A task joined with the category it belongs to.
#[derive(Debug, Clone)]
pub struct ViewTask {
    pub task: Task,
    pub category: Option<Category>,
}

/// Parses `#rrggbb` into a table color. Anything else renders uncolored.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        digits.get(range).and_then(|s| u8::from_str_radix(s, 16).ok())
    };
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

fn muted(dark_mode: bool) -> Color {
    if dark_mode {
        Color::Grey
    } else {
        Color::DarkGrey
    }
}

pub fn display_tasks(tasks: &[ViewTask], dark_mode: bool) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Category", "Status", "Created"]);

    for view in tasks {
        let task = &view.task;
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&task.id)));

        let mut title = task.title.clone();
        if !task.description.is_empty() {
            title.push_str(&format!("\n{}", task.description));
        }
        let mut title_cell = Cell::new(title);
        if task.completed {
            title_cell = title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(muted(dark_mode));
        }
        row.add_cell(title_cell);

        let category_cell = match &view.category {
            Some(category) => {
                let cell = Cell::new(&category.name);
                match hex_color(&category.color) {
                    Some(color) => cell.fg(color),
                    None => cell,
                }
            }
            None => Cell::new(&task.category_id).fg(muted(dark_mode)),
        };
        row.add_cell(category_cell);

        let status_cell = if task.completed {
            Cell::new("Completed").fg(Color::Green)
        } else {
            Cell::new("Pending")
        };
        row.add_cell(status_cell);

        row.add_cell(Cell::new(task.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_categories(categories: &[(Category, usize)]) {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Color", "Tasks"]);

    for (category, count) in categories {
        let mut row = Row::new();
        row.add_cell(Cell::new(&category.id));

        let mut name_cell = Cell::new(&category.name);
        if category.is_default() {
            name_cell = name_cell.add_attribute(Attribute::Italic);
        }
        row.add_cell(name_cell);

        let label = match color_name(&category.color) {
            Some(name) => format!("{} ({})", name, category.color),
            None => category.color.clone(),
        };
        let color_cell = match hex_color(&category.color) {
            Some(color) => Cell::new(label).fg(color),
            None => Cell::new(label),
        };
        row.add_cell(color_cell);
        row.add_cell(Cell::new(count));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_stats(stats: &TaskStats, categories: &[Category]) {
    let mut table = Table::new();
    table.set_header(vec!["", "Tasks"]);
    table.add_row(vec![Cell::new("Total"), Cell::new(stats.total)]);
    table.add_row(vec![
        Cell::new("Completed"),
        Cell::new(stats.completed).fg(Color::Green),
    ]);
    table.add_row(vec![Cell::new("Pending"), Cell::new(stats.pending)]);

    for (category_id, count) in &stats.by_category {
        let name = categories
            .iter()
            .find(|c| &c.id == category_id)
            .map(|c| c.name.as_str())
            .unwrap_or(category_id.as_str());
        table.add_row(vec![Cell::new(format!("  {}", name)), Cell::new(count)]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert!(matches!(
            hex_color("#e74c3c"),
            Some(Color::Rgb { r: 0xe7, g: 0x4c, b: 0x3c })
        ));
        assert!(hex_color("e74c3c").is_none());
        assert!(hex_color("#fff").is_none());
        assert!(hex_color("#zzzzzz").is_none());
    }
}
