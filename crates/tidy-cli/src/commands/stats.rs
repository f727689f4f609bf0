use anyhow::Result;
use tidy_core::app::Tidy;

use crate::views::table::display_stats;

pub fn show_stats(tidy: &Tidy) -> Result<()> {
    let stats = tidy.tasks().stats();
    display_stats(&stats, &tidy.categories().all());
    Ok(())
}
