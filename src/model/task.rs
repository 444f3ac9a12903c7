use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a priority token. Case-insensitive; anything unrecognized is `None`.
    pub fn from_token(s: &str) -> Option<Priority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// The canonical lowercase token for this priority
    pub fn token(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Sort rank for an optional priority: high=1, medium=2, low=3, absent=4.
/// Lower ranks sort first; this is the only way priority enters a comparator.
pub fn priority_rank(priority: Option<Priority>) -> u8 {
    match priority {
        Some(Priority::High) => 1,
        Some(Priority::Medium) => 2,
        Some(Priority::Low) => 3,
        None => 4,
    }
}

/// Presentation color token for a priority (neutral default for absent)
pub fn priority_color(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::High) => "accent",
        Some(Priority::Medium) => "secondary",
        Some(Priority::Low) => "info",
        None => "gray",
    }
}

/// Human-readable priority label
pub fn priority_label(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::High) => "High Priority",
        Some(Priority::Medium) => "Medium Priority",
        Some(Priority::Low) => "Low Priority",
        None => "No Priority",
    }
}

/// A task in its canonical internal shape.
///
/// Wire records in either field-naming convention are normalized into this
/// shape at the store boundary (`store::record`) before anything else sees
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier, unique across tasks
    pub id: u32,
    /// Title (non-empty after trim; enforced by the store on create/update)
    pub title: String,
    /// Free-form description, may be empty
    #[serde(default)]
    pub description: String,
    /// Priority; `None` when absent or unrecognized on the wire
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Due calendar date (no time component)
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Owning list, if any (may dangle after a list is deleted)
    #[serde(default)]
    pub list_id: Option<u32>,
    /// Completion flag; doubles as the archive marker
    #[serde(default)]
    pub completed: bool,
    /// Set iff `completed` is true
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Assigned by the store at creation; immutable
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// The timestamp the archive sorts and groups by: completion time,
    /// falling back to creation time when completion time is absent.
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or(self.created_at)
    }
}
