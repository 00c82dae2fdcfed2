//! Plain-text rendering of the store's derived views.

use std::fmt::Write as _;

use chrono::NaiveDate;
use taskboard_core::{Counts, Filter, Task};

pub fn board(tasks: &[&Task], counts: Counts, filter: Filter, today: NaiveDate) -> String {
    let mut out = format!(
        "all {} | active {} | completed {}   [filter: {filter}]\n",
        counts.all, counts.active, counts.completed
    );
    if tasks.is_empty() {
        out.push_str(filter.empty_message());
        out.push('\n');
        return out;
    }
    for task in tasks {
        out.push_str(&line(task, today));
        out.push('\n');
    }
    out
}

pub fn line(task: &Task, today: NaiveDate) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut out = format!("[{mark}] {}  {} ({})", task.id, task.title, task.priority);
    if let Some(category) = task.category.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(out, " @{category}");
    }
    for tag in &task.tags {
        let _ = write!(out, " #{tag}");
    }
    if let Some(due) = task.due_date {
        let _ = write!(out, " due {due}");
        if task.is_overdue(today) {
            out.push_str(" OVERDUE");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use taskboard_core::Priority;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn task(id: &str, completed: bool) -> Task {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "title": format!("Task {id}"),
            "completed": completed,
        }))
        .unwrap()
    }

    #[test]
    fn empty_board_shows_filter_message() {
        let out = board(&[], Counts::default(), Filter::Active, today());
        assert!(out.starts_with("all 0 | active 0 | completed 0"));
        assert!(out.contains(Filter::Active.empty_message()));
    }

    #[test]
    fn line_shows_metadata_and_overdue() {
        let mut t = task("7", false);
        t.priority = Priority::High;
        t.category = Some("work".to_string());
        t.tags = vec!["a".to_string(), "b".to_string()];
        t.due_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(
            line(&t, today()),
            "[ ] 7  Task 7 (high) @work #a #b due 2024-05-01 OVERDUE"
        );
        t.completed = true;
        assert_eq!(line(&t, today()), "[x] 7  Task 7 (high) @work #a #b due 2024-05-01");
    }

    #[test]
    fn board_lists_tasks_in_order() {
        let a = task("1", false);
        let b = task("2", true);
        let counts = Counts { all: 2, active: 1, completed: 1 };
        let out = board(&[&a, &b], counts, Filter::All, today());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("[ ] 1"));
        assert!(lines[2].starts_with("[x] 2"));
    }
}
