//! Wire-record normalization.
//!
//! The remote record API has drifted through two field-naming conventions: a
//! legacy flat one (`title`, `dueDate`, `listId`, `completed`, `completedAt`)
//! and a suffixed one (`title_c`, `due_date_c`, `list_id_c`, `completed_c`,
//! `completed_at_c`). Records may carry either or both; the suffixed form
//! wins when both are present. Everything is normalized into the canonical
//! `Task`/`List` shapes here, at the store boundary, so no `a ?? b` fallback
//! ever reaches a comparator.
//!
//! Field values are forgiving: malformed dates and unknown priorities degrade
//! to `None` rather than failing the record. Only a missing identifier is an
//! error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::model::list::{List, DEFAULT_LIST_COLOR};
use crate::model::task::{Priority, Task};
use crate::store::error::StoreError;

/// A list reference as it appears on the wire: a bare number, a numeric
/// string, or an embedded object carrying an id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListRef {
    Id(u32),
    Text(String),
    Embedded(EmbeddedListRef),
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedListRef {
    #[serde(default, alias = "Id")]
    pub id: Option<u32>,
}

impl ListRef {
    /// Canonical resolution: numeric ids pass through, numeric strings parse,
    /// embedded objects contribute their id, anything else is a dangling
    /// reference and resolves to `None`.
    pub fn resolve(&self) -> Option<u32> {
        match self {
            ListRef::Id(id) => Some(*id),
            ListRef::Text(s) => s.trim().parse().ok(),
            ListRef::Embedded(embedded) => embedded.id,
        }
    }
}

/// A task record as returned by the remote store, in either naming convention
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskRecord {
    #[serde(default, alias = "Id")]
    pub id: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_c: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_c: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub priority_c: Option<String>,
    #[serde(default, alias = "dueDate")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub due_date_c: Option<String>,
    #[serde(default, alias = "listId")]
    pub list_id: Option<ListRef>,
    #[serde(default)]
    pub list_id_c: Option<ListRef>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub completed_c: Option<bool>,
    #[serde(default, alias = "completedAt")]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub completed_at_c: Option<String>,
    #[serde(default, alias = "createdAt", alias = "CreatedOn")]
    pub created_at: Option<String>,
}

impl TaskRecord {
    /// Normalize into the canonical `Task` shape.
    ///
    /// Fails only on a missing id. The completed/completed-at invariant is
    /// repaired in one direction: an incomplete task never keeps a stray
    /// completion timestamp.
    pub fn normalize(self) -> Result<Task, StoreError> {
        let id = self.id.ok_or(StoreError::MissingId)?;

        let completed = self.completed_c.or(self.completed).unwrap_or(false);
        let completed_at = self
            .completed_at_c
            .or(self.completed_at)
            .as_deref()
            .and_then(parse_timestamp)
            .filter(|_| completed);

        Ok(Task {
            id,
            title: self.title_c.or(self.title).unwrap_or_default(),
            description: self.description_c.or(self.description).unwrap_or_default(),
            priority: self
                .priority_c
                .or(self.priority)
                .as_deref()
                .and_then(Priority::from_token),
            due_date: self
                .due_date_c
                .or(self.due_date)
                .as_deref()
                .and_then(parse_date),
            list_id: self
                .list_id_c
                .or(self.list_id)
                .as_ref()
                .and_then(ListRef::resolve),
            completed,
            completed_at,
            created_at: self
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(DateTime::UNIX_EPOCH),
        })
    }
}

/// A list record as returned by the remote store.
///
/// Legacy list records carried both a numeric `Id` and a string slug `id`;
/// the numeric form is canonical.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRecord {
    #[serde(default, rename = "Id")]
    pub legacy_id: Option<u32>,
    #[serde(default)]
    pub id: Option<ListRef>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_c: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub color_c: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default, alias = "createdAt", alias = "CreatedOn")]
    pub created_at: Option<String>,
}

impl ListRecord {
    pub fn normalize(self) -> Result<List, StoreError> {
        let id = self
            .legacy_id
            .or_else(|| self.id.as_ref().and_then(ListRef::resolve))
            .ok_or(StoreError::MissingId)?;

        Ok(List {
            id,
            name: self.name_c.or(self.name).unwrap_or_default(),
            color: self
                .color_c
                .or(self.color)
                .unwrap_or_else(|| DEFAULT_LIST_COLOR.to_string()),
            order: self.order.unwrap_or(0),
            created_at: self
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(DateTime::UNIX_EPOCH),
        })
    }
}

/// Parse a wire due date: plain `YYYY-MM-DD`, or the date part of a full
/// ISO timestamp. Malformed input is `None`, never an error.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // Full timestamp: keep the calendar date only
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Parse a wire timestamp (RFC 3339). Malformed input is `None`.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn legacy_flat_record_normalizes() {
        let record: TaskRecord = serde_json::from_str(
            r#"{
                "Id": 3,
                "title": "Buy groceries",
                "description": "milk and bread",
                "priority": "high",
                "dueDate": "2025-03-14",
                "listId": 2,
                "completed": false,
                "completedAt": null,
                "createdAt": "2025-03-01T10:00:00Z"
            }"#,
        )
        .unwrap();
        let task = record.normalize().unwrap();

        assert_eq!(task.id, 3);
        assert_eq!(task.title, "Buy groceries");
        assert_eq!(task.priority, Some(Priority::High));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(task.list_id, Some(2));
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
        assert_eq!(
            task.created_at,
            Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn suffixed_record_normalizes() {
        let record: TaskRecord = serde_json::from_str(
            r#"{
                "Id": 7,
                "title_c": "Ship release",
                "description_c": "",
                "priority_c": "medium",
                "due_date_c": "2025-03-20",
                "list_id_c": {"Id": 4},
                "completed_c": true,
                "completed_at_c": "2025-03-18T16:00:00Z",
                "CreatedOn": "2025-03-02T08:30:00Z"
            }"#,
        )
        .unwrap();
        let task = record.normalize().unwrap();

        assert_eq!(task.title, "Ship release");
        assert_eq!(task.list_id, Some(4));
        assert!(task.completed);
        assert!(task.completed_at.is_some());
    }

    #[test]
    fn suffixed_fields_win_over_legacy() {
        let record: TaskRecord = serde_json::from_str(
            r#"{
                "Id": 1,
                "title": "old title",
                "title_c": "new title",
                "completed": true,
                "completed_c": false,
                "createdAt": "2025-03-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        let task = record.normalize().unwrap();
        assert_eq!(task.title, "new title");
        assert!(!task.completed);
    }

    #[test]
    fn missing_id_is_the_only_hard_failure() {
        let record: TaskRecord = serde_json::from_str(r#"{"title": "orphan"}"#).unwrap();
        assert!(matches!(record.normalize(), Err(StoreError::MissingId)));
    }

    #[test]
    fn malformed_values_degrade_to_none() {
        let record: TaskRecord = serde_json::from_str(
            r#"{
                "Id": 9,
                "title": "odd record",
                "priority": "urgent",
                "dueDate": "not-a-date",
                "listId": "garden",
                "createdAt": "also-not-a-date"
            }"#,
        )
        .unwrap();
        let task = record.normalize().unwrap();
        assert_eq!(task.priority, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.list_id, None);
        assert_eq!(task.created_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn due_date_accepts_full_timestamp() {
        let record: TaskRecord = serde_json::from_str(
            r#"{"Id": 1, "title": "t", "dueDate": "2025-03-14T09:30:00Z"}"#,
        )
        .unwrap();
        let task = record.normalize().unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 14));
    }

    #[test]
    fn list_ref_forms_resolve() {
        let bare: ListRef = serde_json::from_str("5").unwrap();
        assert_eq!(bare.resolve(), Some(5));

        let text: ListRef = serde_json::from_str(r#""12""#).unwrap();
        assert_eq!(text.resolve(), Some(12));

        let embedded: ListRef = serde_json::from_str(r#"{"Id": 8, "Name": "Work"}"#).unwrap();
        assert_eq!(embedded.resolve(), Some(8));

        let slug: ListRef = serde_json::from_str(r#""work""#).unwrap();
        assert_eq!(slug.resolve(), None);
    }

    #[test]
    fn stray_completion_timestamp_is_dropped_for_incomplete_task() {
        let record: TaskRecord = serde_json::from_str(
            r#"{
                "Id": 2,
                "title": "t",
                "completed": false,
                "completedAt": "2025-03-05T12:00:00Z"
            }"#,
        )
        .unwrap();
        let task = record.normalize().unwrap();
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn legacy_list_with_numeric_and_slug_id_prefers_numeric() {
        let record: ListRecord = serde_json::from_str(
            r#"{
                "Id": 3,
                "id": "personal",
                "name": "Personal",
                "color": "emerald",
                "order": 2,
                "createdAt": "2025-01-15T00:00:00Z"
            }"#,
        )
        .unwrap();
        let list = record.normalize().unwrap();
        assert_eq!(list.id, 3);
        assert_eq!(list.name, "Personal");
        assert_eq!(list.color, "emerald");
        assert_eq!(list.created_at.year(), 2025);
    }

    #[test]
    fn list_defaults_color_when_absent() {
        let record: ListRecord =
            serde_json::from_str(r#"{"Id": 1, "name": "Inbox"}"#).unwrap();
        let list = record.normalize().unwrap();
        assert_eq!(list.color, DEFAULT_LIST_COLOR);
        assert_eq!(list.order, 0);
    }
}
