use chrono::NaiveDate;
use serde::Serialize;

use crate::model::list::List;
use crate::model::task::{priority_label, Task};
use crate::ops::group::TaskGroup;
use crate::util::dates;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u32,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_severity: Option<dates::BadgeSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<u32>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub created_at: String,
}

#[derive(Serialize)]
pub struct GroupJson {
    pub label: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct ListJson {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub order: i32,
    pub task_count: usize,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task, today: NaiveDate) -> TaskJson {
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority.map(|p| p.token()),
        due_date: task.due_date,
        due_label: dates::classify_due_date(task.due_date, today),
        due_severity: task
            .due_date
            .map(|_| dates::badge_severity(task.due_date, today)),
        list_id: task.list_id,
        completed: task.completed,
        completed_at: task.completed_at.map(|t| t.to_rfc3339()),
        created_at: task.created_at.to_rfc3339(),
    }
}

pub fn group_to_json(group: &TaskGroup<'_>, today: NaiveDate) -> GroupJson {
    GroupJson {
        label: group.label.clone(),
        tasks: group.tasks.iter().map(|t| task_to_json(t, today)).collect(),
    }
}

pub fn list_to_json(list: &List, task_count: usize) -> ListJson {
    ListJson {
        id: list.id,
        name: list.name.clone(),
        color: list.color.clone(),
        order: list.order,
        task_count,
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// One task as a terminal line: checkbox, id, title, then due and priority
/// badges when present.
pub fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{} {:>3}  {}", checkbox, task.id, task.title);

    if let Some(label) = dates::classify_due_date(task.due_date, today) {
        line.push_str(&format!("  ({})", label));
    }
    if let Some(priority) = task.priority {
        line.push_str(&format!("  !{}", priority.token()));
    }
    line
}

pub fn print_task_lines(tasks: &[&Task], today: NaiveDate) {
    if tasks.is_empty() {
        println!("  (no tasks)");
        return;
    }
    for task in tasks {
        println!("  {}", format_task_line(task, today));
    }
}

pub fn print_groups(groups: &[TaskGroup<'_>], today: NaiveDate) {
    if groups.is_empty() {
        println!("  (no tasks)");
        return;
    }
    for group in groups {
        println!("{}", group.label);
        print_task_lines(&group.tasks, today);
        println!();
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line task confirmation after a write command
pub fn print_task_result(verb: &str, task: &Task) {
    println!(
        "{} task {}: {} ({})",
        verb,
        task.id,
        task.title,
        priority_label(task.priority)
    );
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::task::Priority;

    fn sample_task() -> Task {
        Task {
            id: 7,
            title: "Water the garden".into(),
            description: String::new(),
            priority: Some(Priority::High),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 12),
            list_id: None,
            completed: false,
            completed_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn line_includes_badges() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let line = format_task_line(&sample_task(), today);
        assert_eq!(line, "[ ]   7  Water the garden  (Today)  !high");
    }

    #[test]
    fn completed_task_gets_checked_box() {
        let mut task = sample_task();
        task.completed = true;
        task.completed_at = Some(Utc.with_ymd_and_hms(2025, 3, 12, 9, 0, 0).unwrap());
        let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        assert!(format_task_line(&task, today).starts_with("[x]"));
    }

    #[test]
    fn json_shape_omits_empty_fields() {
        let mut task = sample_task();
        task.priority = None;
        task.due_date = None;
        let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let json = serde_json::to_value(task_to_json(&task, today)).unwrap();
        assert_eq!(json.get("priority"), None);
        assert_eq!(json.get("due_label"), None);
        assert_eq!(json["id"], 7);
        assert_eq!(json["completed"], false);
    }
}
