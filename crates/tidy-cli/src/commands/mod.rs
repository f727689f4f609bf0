pub mod add;
pub mod category;
pub mod clear_completed;
pub mod delete;
pub mod edit;
pub mod flags;
pub mod list;
pub mod stats;
pub mod toggle;
