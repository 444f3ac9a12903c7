//! Temporal grouping for the Upcoming and Archive views.
//!
//! Both groupers take an already-sorted slice and bucket it without
//! reordering: buckets appear in the order their first member does, and each
//! task lands in exactly one bucket.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::model::task::Task;
use crate::util::dates;

/// A named, ordered bucket of tasks within a grouped view
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup<'a> {
    pub label: String,
    pub tasks: Vec<&'a Task>,
}

/// Group upcoming tasks by how far out they are due.
///
/// Labels, in precedence order: "This Week", "Next Week", "In N weeks" for
/// N = ceil(days-until-due / 7) up to 4, then the due month ("March 2025").
/// Tasks without a due date (only possible when the caller bypasses the
/// Upcoming scope) collect under "No Due Date".
pub fn group_upcoming<'a>(tasks: &[&'a Task], today: NaiveDate) -> Vec<TaskGroup<'a>> {
    let mut buckets: IndexMap<String, Vec<&Task>> = IndexMap::new();
    for &task in tasks {
        buckets
            .entry(upcoming_bucket(task.due_date, today))
            .or_default()
            .push(task);
    }
    into_groups(buckets)
}

/// Group archived tasks by the calendar day they were finished
/// (completion time, falling back to creation time).
pub fn group_archive<'a>(tasks: &[&'a Task]) -> Vec<TaskGroup<'a>> {
    let mut buckets: IndexMap<String, Vec<&Task>> = IndexMap::new();
    for &task in tasks {
        let label = task
            .finished_at()
            .date_naive()
            .format("%B %-d, %Y")
            .to_string();
        buckets.entry(label).or_default().push(task);
    }
    into_groups(buckets)
}

fn upcoming_bucket(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(due) = due else {
        return "No Due Date".to_string();
    };

    if dates::is_this_week(due, today) {
        return "This Week".to_string();
    }
    if dates::is_next_week(due, today) {
        return "Next Week".to_string();
    }

    let weeks = dates::weeks_until(due, today);
    if (1..=4).contains(&weeks) {
        if weeks == 1 {
            "In 1 week".to_string()
        } else {
            format!("In {} weeks", weeks)
        }
    } else {
        due.format("%B %Y").to_string()
    }
}

fn into_groups(buckets: IndexMap<String, Vec<&Task>>) -> Vec<TaskGroup<'_>> {
    buckets
        .into_iter()
        .map(|(label, tasks)| TaskGroup { label, tasks })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // 2025-03-12 is a Wednesday
    fn today() -> NaiveDate {
        d(2025, 3, 12)
    }

    fn task(id: u32, due: Option<NaiveDate>) -> Task {
        Task {
            id,
            title: format!("task-{}", id),
            description: String::new(),
            priority: None,
            due_date: due,
            list_id: None,
            completed: false,
            completed_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn labels<'a>(groups: &'a [TaskGroup<'a>]) -> Vec<&'a str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    // --- upcoming ---

    #[test]
    fn wednesday_task_due_following_monday_is_next_week() {
        let t = task(1, Some(d(2025, 3, 17)));
        let refs = vec![&t];
        let groups = group_upcoming(&refs, today());
        assert_eq!(labels(&groups), vec!["Next Week"]);
    }

    #[test]
    fn buckets_cover_this_week_through_month_fallback() {
        let this_week = task(1, Some(d(2025, 3, 14)));
        let next_week = task(2, Some(d(2025, 3, 18)));
        let in_two = task(3, Some(d(2025, 3, 25))); // 13 days -> 2 weeks
        let in_four = task(4, Some(d(2025, 4, 8))); // 27 days -> 4 weeks
        let far = task(5, Some(d(2025, 6, 2))); // beyond 4 weeks
        let refs = vec![&this_week, &next_week, &in_two, &in_four, &far];

        let groups = group_upcoming(&refs, today());
        assert_eq!(
            labels(&groups),
            vec!["This Week", "Next Week", "In 2 weeks", "In 4 weeks", "June 2025"]
        );
    }

    #[test]
    fn week_count_boundary() {
        assert_eq!(
            super::upcoming_bucket(Some(d(2025, 3, 25)), today()),
            "In 2 weeks"
        );
        assert_eq!(
            super::upcoming_bucket(Some(d(2025, 4, 10)), today()),
            "April 2025"
        );
    }

    #[test]
    fn buckets_preserve_first_seen_order() {
        // Sorted input interleaves due dates; bucket order follows first
        // appearance, not calendar order.
        let far = task(1, Some(d(2025, 6, 2)));
        let near = task(2, Some(d(2025, 3, 14)));
        let refs = vec![&far, &near];

        let groups = group_upcoming(&refs, today());
        assert_eq!(labels(&groups), vec!["June 2025", "This Week"]);
    }

    #[test]
    fn missing_due_date_gets_its_own_bucket() {
        let none = task(1, None);
        let refs = vec![&none];
        let groups = group_upcoming(&refs, today());
        assert_eq!(labels(&groups), vec!["No Due Date"]);
    }

    #[test]
    fn grouping_neither_drops_nor_duplicates() {
        let tasks: Vec<Task> = vec![
            task(1, Some(d(2025, 3, 14))),
            task(2, Some(d(2025, 3, 18))),
            task(3, Some(d(2025, 5, 1))),
            task(4, None),
            task(5, Some(d(2025, 3, 14))),
        ];
        let refs: Vec<&Task> = tasks.iter().collect();
        let groups = group_upcoming(&refs, today());

        let mut grouped_ids: Vec<u32> = groups
            .iter()
            .flat_map(|g| g.tasks.iter().map(|t| t.id))
            .collect();
        grouped_ids.sort_unstable();
        assert_eq!(grouped_ids, vec![1, 2, 3, 4, 5]);
    }

    // --- archive ---

    #[test]
    fn archive_groups_by_finish_day_in_input_order() {
        let finished = |id: u32, day: u32| {
            let mut t = task(id, None);
            t.completed = true;
            t.completed_at = Some(Utc.with_ymd_and_hms(2025, 3, day, 15, 0, 0).unwrap());
            t
        };
        // Already sorted most-recent-first; two tasks finished the same day
        let a = finished(1, 10);
        let b = finished(2, 10);
        let c = finished(3, 4);
        let refs = vec![&a, &b, &c];

        let groups = group_archive(&refs);
        assert_eq!(labels(&groups), vec!["March 10, 2025", "March 4, 2025"]);
        assert_eq!(groups[0].tasks.len(), 2);
        assert_eq!(groups[1].tasks.len(), 1);
    }

    #[test]
    fn archive_falls_back_to_creation_day() {
        let mut t = task(1, None);
        t.completed = true; // no completed_at recorded
        let refs = vec![&t];
        let groups = group_archive(&refs);
        assert_eq!(labels(&groups), vec!["March 1, 2025"]);
    }
}
