use clap::{Parser, Subcommand};

/// Tidy: a local-first to-do manager with categories, search and completion tracking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Toggle a task between pending and completed
    Toggle(ToggleCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Delete every completed task
    ClearCompleted(ClearCompletedCommand),
    /// Show task statistics
    Stats,
    /// Manage categories
    Category(CategoryCommand),
    /// Inspect or refresh feature flags
    Flags(FlagsCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long, default_value = "")]
    pub description: String,
    /// Category id or name (unknown categories fall back to the default one)
    #[clap(short, long)]
    pub category: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only show tasks in this category (id or name)
    #[clap(short, long)]
    pub category: Option<String>,
    /// Case-insensitive text to look for in titles and descriptions
    #[clap(short, long)]
    pub search: Option<String>,
    /// Hide completed tasks
    #[clap(long)]
    pub hide_completed: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Move the task to another category (id or name)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ToggleCommand {
    /// The ID of the task to toggle
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ClearCompletedCommand {
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategorySubcommand {
    /// Add a new category
    Add(AddCategoryCommand),
    /// List categories with their task counts
    List,
    /// Rename or recolor a category
    Edit(EditCategoryCommand),
    /// Delete a category, moving its tasks to "Uncategorized"
    Delete(DeleteCategoryCommand),
    /// Show the available colors
    Colors,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCategoryCommand {
    /// The name of the category
    pub name: String,
    /// Hex color, e.g. '#3498db' (see `tidy category colors`)
    #[arg(long, default_value = "#3498db")]
    pub color: String,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCategoryCommand {
    /// Category id or name
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCategoryCommand {
    /// Category id or name
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FlagsCommand {
    #[command(subcommand)]
    pub command: FlagsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FlagsSubcommand {
    /// Show the flags currently in effect
    Show,
    /// Re-read the flag source and show the result
    Refresh,
}
