//! String-typed form state for creating and editing tasks.
//!
//! `TaskForm` holds exactly what a user typed. `TaskForm::from_task`
//! pre-fills it for editing; `TaskForm::to_draft` turns it back into a
//! validated `TaskDraft` for a create, `TaskForm::to_patch` into a
//! `TaskPatch` for an edit.

use crate::error::ApiError;
use crate::types::{parse_date, parse_tags, Priority, Task, TaskDraft, TaskPatch};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    /// `YYYY-MM-DD`, or empty for no due date.
    pub due_date: String,
    /// Comma-separated.
    pub tags: String,
    pub completed: bool,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            category: task.category.clone().unwrap_or_default(),
            due_date: task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            tags: task.tags.join(", "),
            completed: task.completed,
        }
    }

    /// Validate and convert. The title is trimmed and must be non-empty;
    /// blank optional text fields and an empty due date are omitted.
    pub fn to_draft(&self) -> Result<TaskDraft, ApiError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::validation("a task title is required"));
        }
        let due_date = match self.due_date.trim() {
            "" => None,
            raw => Some(parse_date(raw).map_err(ApiError::validation)?),
        };
        Ok(TaskDraft {
            title: title.to_string(),
            description: non_blank(&self.description),
            priority: self.priority,
            category: non_blank(&self.category),
            due_date,
            tags: parse_tags(&self.tags),
            completed: self.completed,
        })
    }

    /// Validate and convert for an edit. Unlike a draft, emptied description
    /// and category are sent as empty strings so the server clears them.
    pub fn to_patch(&self) -> Result<TaskPatch, ApiError> {
        let draft = self.to_draft()?;
        Ok(TaskPatch {
            description: Some(self.description.trim().to_string()),
            category: Some(self.category.trim().to_string()),
            ..TaskPatch::from(draft)
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
