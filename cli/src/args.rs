//! Command-line arguments.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use taskboard_core::{parse_tags, Filter, Priority, TaskForm, TaskPatch};

#[derive(Parser, Debug)]
#[command(version, about = "Manage tasks on a taskboard server")]
pub struct Cli {
    /// Base URL of the task collection (default: http://localhost:5000/api/todos).
    #[arg(long, env = "TASKBOARD_API_URL")]
    pub api_url: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", env = "TASKBOARD_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show tasks.
    List {
        /// Which tasks to show: all, active or completed.
        #[arg(long, short, default_value = "all")]
        filter: Filter,
    },
    /// Create a task.
    Add(AddArgs),
    /// Change fields of an existing task.
    Edit(EditArgs),
    /// Mark a task completed.
    Done { id: String },
    /// Mark a task active again.
    Undo { id: String },
    /// Delete a task.
    Rm { id: String },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub title: String,

    #[arg(long, short)]
    pub description: Option<String>,

    /// low, medium or high.
    #[arg(long, short, default_value = "medium")]
    pub priority: Priority,

    #[arg(long, short)]
    pub category: Option<String>,

    /// Due date as YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<String>,

    /// Comma-separated tags.
    #[arg(long, short)]
    pub tags: Option<String>,
}

impl AddArgs {
    pub fn to_form(&self) -> TaskForm {
        TaskForm {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            priority: self.priority,
            category: self.category.clone().unwrap_or_default(),
            due_date: self.due.clone().unwrap_or_default(),
            tags: self.tags.clone().unwrap_or_default(),
            completed: false,
        }
    }
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub description: Option<String>,

    #[arg(long, short)]
    pub priority: Option<Priority>,

    #[arg(long, short)]
    pub category: Option<String>,

    /// Due date as YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<String>,

    /// Comma-separated tags; replaces the current set.
    #[arg(long, short)]
    pub tags: Option<String>,
}

impl EditArgs {
    /// Overlay the given flags on a form pre-filled from the current task.
    pub fn apply(&self, form: &mut TaskForm) {
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if let Some(category) = &self.category {
            form.category = category.clone();
        }
        if let Some(due) = &self.due {
            form.due_date = due.clone();
        }
        if let Some(tags) = &self.tags {
            form.tags = tags.clone();
        }
    }

    /// A sparse patch carrying only the given flags, for a task that is not
    /// in the loaded list.
    pub fn to_patch(&self) -> anyhow::Result<TaskPatch> {
        let due_date = match self.due.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .with_context(|| format!("invalid due date `{raw}`, expected YYYY-MM-DD"))?,
            ),
        };
        Ok(TaskPatch {
            title: self.title.as_deref().map(|t| t.trim().to_string()),
            description: self.description.as_deref().map(|d| d.trim().to_string()),
            priority: self.priority,
            category: self.category.as_deref().map(|c| c.trim().to_string()),
            due_date,
            tags: self.tags.as_deref().map(parse_tags),
            completed: None,
        })
    }
}
