//! Due-date classification helpers.
//!
//! Every function here is pure and total: the reference day is an explicit
//! `today` parameter, absent dates classify to a neutral result, and nothing
//! panics. Weeks start on Monday.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Severity of a due-date badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeSeverity {
    Default,
    Warning,
    Error,
    Info,
}

/// Classify a due date into a display label.
///
/// Precedence: Today > Tomorrow > Yesterday > weekday name (same Monday-start
/// week as `today`) > `"%b %-d"` fallback (e.g. "Mar 5"). Absent dates give
/// `None`.
pub fn classify_due_date(due: Option<NaiveDate>, today: NaiveDate) -> Option<String> {
    let due = due?;

    if due == today {
        return Some("Today".to_string());
    }
    if due == today + Duration::days(1) {
        return Some("Tomorrow".to_string());
    }
    if due == today - Duration::days(1) {
        return Some("Yesterday".to_string());
    }
    if is_this_week(due, today) {
        return Some(due.format("%A").to_string());
    }
    Some(due.format("%b %-d").to_string())
}

/// Badge severity for a due date.
///
/// `Error` only for dates strictly before the start of today, so a task due
/// later today is never flagged overdue. Absent dates are `Default`.
pub fn badge_severity(due: Option<NaiveDate>, today: NaiveDate) -> BadgeSeverity {
    let Some(due) = due else {
        return BadgeSeverity::Default;
    };

    if due < today {
        BadgeSeverity::Error
    } else if due == today {
        BadgeSeverity::Warning
    } else if due == today + Duration::days(1) {
        BadgeSeverity::Info
    } else {
        BadgeSeverity::Default
    }
}

/// True iff the due date is strictly before the start of today
pub fn is_overdue(due: Option<NaiveDate>, today: NaiveDate) -> bool {
    due.is_some_and(|d| d < today)
}

/// True iff the due date is between today and three days out, inclusive
pub fn is_due_soon(due: Option<NaiveDate>, today: NaiveDate) -> bool {
    due.is_some_and(|d| {
        let days = (d - today).num_days();
        (0..=3).contains(&days)
    })
}

/// The Monday starting the week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// True iff `date` falls in the same Monday-start week as `today`
pub fn is_this_week(date: NaiveDate, today: NaiveDate) -> bool {
    week_start(date) == week_start(today)
}

/// True iff `date` falls in the week immediately after `today`'s
pub fn is_next_week(date: NaiveDate, today: NaiveDate) -> bool {
    week_start(date) == week_start(today) + Duration::days(7)
}

/// Whole weeks until `due`, rounding up. Zero or negative for today and past
/// dates.
pub fn weeks_until(due: NaiveDate, today: NaiveDate) -> i64 {
    let days = (due - today).num_days();
    days.div_euclid(7) + i64::from(days.rem_euclid(7) != 0)
}
