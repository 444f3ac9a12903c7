//! The filter/sort engine shared by every view.
//!
//! Each screen used to re-implement its own filter + sort chain; this module
//! is the single parametrized replacement. The pipeline order is load-bearing:
//! scope, then status, then search, then sort. Callers pass an explicit
//! `today` so results are deterministic under test.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::model::task::{priority_rank, Task};
use crate::util::dates;

/// The base population a view considers before status/search filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewScope {
    /// Every task
    All,
    /// Tasks due exactly today (tasks without a due date never match)
    Today,
    /// Tasks due strictly after today (tasks without a due date never match)
    Upcoming,
    /// Tasks belonging to the given list
    List(u32),
    /// Completed tasks only
    Archive,
}

/// The active/completed/all axis, plus the Upcoming view's temporal tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
    ThisWeek,
    NextWeek,
}

/// A complete view request: scope, status axis, and free-text search
#[derive(Debug, Clone)]
pub struct ViewQuery {
    pub scope: ViewScope,
    pub status: StatusFilter,
    pub search: Option<String>,
}

impl ViewQuery {
    pub fn new(scope: ViewScope) -> Self {
        ViewQuery {
            scope,
            status: StatusFilter::All,
            search: None,
        }
    }
}

/// Run the full pipeline: scope, status, search, then the scope's sort order.
///
/// The input is never mutated; the result borrows from it. Sorting is stable,
/// so tasks with equal keys keep their input order.
pub fn select<'a>(tasks: &'a [Task], query: &ViewQuery, today: NaiveDate) -> Vec<&'a Task> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    // The archive has no active/completed axis; everything in it is completed
    let status = match query.scope {
        ViewScope::Archive => StatusFilter::All,
        _ => query.status,
    };

    let mut selected: Vec<&Task> = tasks
        .iter()
        .filter(|t| in_scope(t, query.scope, today))
        .filter(|t| matches_status(t, status, today))
        .filter(|t| match &needle {
            Some(q) => matches_search(t, q),
            None => true,
        })
        .collect();

    match query.scope {
        ViewScope::Upcoming => selected.sort_by(|a, b| due_date_order(a, b)),
        ViewScope::Archive => selected.sort_by(|a, b| archive_order(a, b)),
        _ => selected.sort_by(|a, b| standard_order(a, b)),
    }

    selected
}

fn in_scope(task: &Task, scope: ViewScope, today: NaiveDate) -> bool {
    match scope {
        ViewScope::All => true,
        ViewScope::Today => task.due_date == Some(today),
        ViewScope::Upcoming => task.due_date.is_some_and(|d| d > today),
        ViewScope::List(list_id) => task.list_id == Some(list_id),
        ViewScope::Archive => task.completed,
    }
}

fn matches_status(task: &Task, status: StatusFilter, today: NaiveDate) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Active => !task.completed,
        StatusFilter::Completed => task.completed,
        StatusFilter::ThisWeek => task.due_date.is_some_and(|d| dates::is_this_week(d, today)),
        StatusFilter::NextWeek => task.due_date.is_some_and(|d| dates::is_next_week(d, today)),
    }
}

/// Case-insensitive substring match against title or description.
/// `needle` must already be trimmed and lowercased.
fn matches_search(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}

/// Default ordering (All/Today/List views): incomplete before completed,
/// then priority rank, then newest creation first.
pub fn standard_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| priority_rank(a.priority).cmp(&priority_rank(b.priority)))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Upcoming ordering: incomplete before completed, then earliest due date
/// (absent due dates last), with priority rank as the final tiebreak.
pub fn due_date_order(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| {
            let key = |t: &Task| (t.due_date.is_none(), t.due_date);
            key(a).cmp(&key(b))
        })
        .then_with(|| priority_rank(a.priority).cmp(&priority_rank(b.priority)))
}

/// Archive ordering: most recently finished first
pub fn archive_order(a: &Task, b: &Task) -> Ordering {
    b.finished_at().cmp(&a.finished_at())
}
