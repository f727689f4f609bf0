use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use tidy_core::app::Tidy;
use tidy_core::models::{FeatureFlags, FLAG_ENABLE_CATEGORIES, FLAG_ENABLE_DARK_MODE};

use crate::cli::{FlagsCommand, FlagsSubcommand};

pub async fn flags_command(tidy: &Tidy, command: FlagsCommand) -> Result<()> {
    let flags = match command.command {
        FlagsSubcommand::Show => tidy.flags().current(),
        FlagsSubcommand::Refresh => tidy.flags().force_fetch().await,
    };

    display_flags(&flags);
    Ok(())
}

fn display_flags(flags: &FeatureFlags) {
    let mut table = Table::new();
    table.set_header(vec!["Flag", "Enabled"]);
    for (name, enabled) in [
        (FLAG_ENABLE_CATEGORIES, flags.enable_categories),
        (FLAG_ENABLE_DARK_MODE, flags.enable_dark_mode),
    ] {
        let cell = if enabled {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![Cell::new(name), cell]);
    }
    println!("{table}");
}
