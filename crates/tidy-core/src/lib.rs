//! # Tidy Core Library
//!
//! State management and persistence for a local-first to-do manager.
//!
//! ## Features
//!
//! - **Categories**: user-defined categories plus one permanent
//!   "uncategorized" fallback that can never be edited or removed
//! - **Reactive stores**: every collection lives in a `tokio::sync::watch`
//!   channel, so subscribers always see the latest state
//! - **Debounced filtering**: a derived view over tasks and the current
//!   filter, recomputed once typing settles
//! - **Local persistence**: collections are mirrored as JSON into a
//!   key-value preference store backed by SQLite
//! - **Feature flags**: optional remote toggles with a cached fetch policy
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`storage`]: Key-value preference store and its JSON adapter
//! - [`store`]: Category and task stores
//! - [`filter`]: The task filtering algorithm
//! - [`flags`]: Feature flag provider
//! - [`app`]: The [`Tidy`](app::Tidy) facade wiring everything together
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tidy_core::{
//!     app::{Tidy, TidyOptions},
//!     models::{NewCategoryData, NewTaskData},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tidy_core::error::CoreError> {
//!     let tidy = Tidy::open_sqlite("tidy.db", TidyOptions::default()).await?;
//!
//!     let errands = tidy
//!         .categories()
//!         .create(NewCategoryData {
//!             name: "Errands".to_string(),
//!             color: "#3498db".to_string(),
//!         })
//!         .await?;
//!
//!     let task = tidy
//!         .create_task(NewTaskData {
//!             title: "Buy milk".to_string(),
//!             category_id: errands.id,
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created task: {}", task.title);
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod db;
pub mod error;
pub mod filter;
pub mod flags;
pub mod ids;
pub mod models;
pub mod storage;
pub mod store;
