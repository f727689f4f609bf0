use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved id of the permanent fallback category.
pub const DEFAULT_CATEGORY_ID: &str = "uncategorized";
pub const DEFAULT_CATEGORY_NAME: &str = "Uncategorized";
pub const DEFAULT_CATEGORY_COLOR: &str = "#95a5a6";

/// Colors offered by the category color picker, with display names.
pub const PREDEFINED_COLORS: [(&str, &str); 12] = [
    ("#e74c3c", "Red"),
    ("#3498db", "Blue"),
    ("#2ecc71", "Green"),
    ("#f39c12", "Orange"),
    ("#9b59b6", "Purple"),
    ("#1abc9c", "Turquoise"),
    ("#e67e22", "Dark Orange"),
    ("#34495e", "Dark Gray"),
    ("#16a085", "Teal"),
    ("#c0392b", "Dark Red"),
    ("#27ae60", "Dark Green"),
    ("#2980b9", "Dark Blue"),
];

/// Human-readable name of a palette color. Case-insensitive on the hex value.
pub fn color_name(hex: &str) -> Option<&'static str> {
    PREDEFINED_COLORS
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(hex))
        .map(|(_, name)| *name)
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Hex color, e.g. `#3498db`
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// The permanent "uncategorized" category every collection starts with.
    pub fn default_category() -> Self {
        Self {
            id: DEFAULT_CATEGORY_ID.to_string(),
            name: DEFAULT_CATEGORY_NAME.to_string(),
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_CATEGORY_ID
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewCategoryData {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryData {
    pub name: Option<String>,
    pub color: Option<String>,
}

// ============================================================================
// Tasks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: String,
    /// Falls back to the default category when it does not exist
    pub category_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub by_category: BTreeMap<String, usize>,
}

// ============================================================================
// Filtering
// ============================================================================

/// Criteria for the filtered task view. Held in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub category_id: Option<String>,
    pub search_text: Option<String>,
    /// Only an explicit `Some(false)` hides completed tasks
    pub show_completed: Option<bool>,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            search_text: None,
            show_completed: Some(true),
        }
    }
}

/// Partial filter merged into the current one. The outer `Option` means
/// "leave unchanged"; `Some(None)` clears the field.
#[derive(Debug, Clone, Default)]
pub struct TaskFilterUpdate {
    pub category_id: Option<Option<String>>,
    pub search_text: Option<Option<String>>,
    pub show_completed: Option<Option<bool>>,
}

impl TaskFilterUpdate {
    pub fn category(category_id: impl Into<String>) -> Self {
        Self {
            category_id: Some(Some(category_id.into())),
            ..Default::default()
        }
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(Some(text.into())),
            ..Default::default()
        }
    }

    pub fn show_completed(show: bool) -> Self {
        Self {
            show_completed: Some(Some(show)),
            ..Default::default()
        }
    }
}

impl TaskFilter {
    pub fn merge(&mut self, update: TaskFilterUpdate) {
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(search_text) = update.search_text {
            self.search_text = search_text;
        }
        if let Some(show_completed) = update.show_completed {
            self.show_completed = show_completed;
        }
    }
}

// ============================================================================
// Feature flags
// ============================================================================

pub const FLAG_ENABLE_CATEGORIES: &str = "enable_categories";
pub const FLAG_ENABLE_DARK_MODE: &str = "enable_dark_mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub enable_categories: bool,
    pub enable_dark_mode: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_categories: true,
            enable_dark_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_merge_keeps_untouched_fields() {
        let mut filter = TaskFilter::default();
        filter.merge(TaskFilterUpdate::search("milk"));
        filter.merge(TaskFilterUpdate::category("c1"));

        assert_eq!(filter.search_text.as_deref(), Some("milk"));
        assert_eq!(filter.category_id.as_deref(), Some("c1"));
        assert_eq!(filter.show_completed, Some(true));

        filter.merge(TaskFilterUpdate {
            category_id: Some(None),
            ..Default::default()
        });
        assert_eq!(filter.category_id, None);
        assert_eq!(filter.search_text.as_deref(), Some("milk"));
    }

    #[test]
    fn task_serializes_with_camel_case_keys() {
        let task = Task {
            id: "task_1_abc".to_string(),
            title: "Write report".to_string(),
            description: String::new(),
            completed: false,
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("categoryId").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn palette_colors_have_names() {
        assert_eq!(color_name("#3498db"), Some("Blue"));
        assert_eq!(color_name("#3498DB"), Some("Blue"));
        assert_eq!(color_name("#000000"), None);
        assert_eq!(color_name(DEFAULT_CATEGORY_COLOR), None);
    }
}
