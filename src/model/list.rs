use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Color token assigned to lists created without an explicit color
pub const DEFAULT_LIST_COLOR: &str = "primary";

/// A named, colored grouping of tasks with a display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Store-assigned identifier, unique across lists
    pub id: u32,
    /// Display name (non-empty)
    pub name: String,
    /// Presentation color token
    #[serde(default = "default_color")]
    pub color: String,
    /// Display order. Values need not be contiguous; ties break by id.
    #[serde(default)]
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_LIST_COLOR.to_string()
}

/// Stable display ordering for lists: numeric order, then id.
pub fn display_order(a: &List, b: &List) -> Ordering {
    a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id))
}
