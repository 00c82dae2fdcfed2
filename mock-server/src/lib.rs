use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: String,
    #[serde(default)]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Option<String>,
    #[serde(default)]
    pub category: String,
    pub due_date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
    pub tags: Option<Vec<String>>,
    pub completed: Option<bool>,
}

/// Newest first, matching what the client shows after a create.
pub type Db = Arc<RwLock<Vec<Task>>>;

type Reply = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/todos", get(list_tasks).post(create_task))
        .route("/api/todos/{id}", get(get_task).patch(update_task).delete(delete_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn ok(status: StatusCode, data: impl Serialize) -> Reply {
    (status, Json(json!({ "success": true, "data": data })))
}

fn fail(status: StatusCode, error: &str) -> Reply {
    (status, Json(json!({ "success": false, "error": error })))
}

fn check_priority(priority: &str) -> Result<(), Reply> {
    match priority {
        "low" | "medium" | "high" => Ok(()),
        _ => Err(fail(StatusCode::BAD_REQUEST, "priority must be low, medium or high")),
    }
}

async fn list_tasks(State(db): State<Db>) -> Reply {
    let tasks = db.read().await;
    ok(StatusCode::OK, &*tasks)
}

async fn create_task(State(db): State<Db>, Json(input): Json<CreateTask>) -> Reply {
    let title = input.title.trim();
    if title.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "title is required");
    }
    let priority = input.priority.unwrap_or_else(|| "medium".to_string());
    if let Err(reply) = check_priority(&priority) {
        return reply;
    }
    let now = Utc::now();
    let task = Task {
        id: Uuid::new_v4().simple().to_string(),
        title: title.to_string(),
        description: input.description,
        priority,
        category: input.category,
        due_date: input.due_date.filter(|d| !d.is_empty()),
        tags: input.tags,
        completed: input.completed,
        created_at: now,
        updated_at: now,
    };
    db.write().await.insert(0, task.clone());
    tracing::debug!(id = %task.id, "task created");
    ok(StatusCode::CREATED, task)
}

async fn get_task(State(db): State<Db>, Path(id): Path<String>) -> Reply {
    let tasks = db.read().await;
    match tasks.iter().find(|t| t.id == id) {
        Some(task) => ok(StatusCode::OK, task),
        None => fail(StatusCode::NOT_FOUND, "task not found"),
    }
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTask>,
) -> Reply {
    if let Some(priority) = &input.priority {
        if let Err(reply) = check_priority(priority) {
            return reply;
        }
    }
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return fail(StatusCode::BAD_REQUEST, "title must not be empty");
    }
    let mut tasks = db.write().await;
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return fail(StatusCode::NOT_FOUND, "task not found");
    };
    if let Some(title) = input.title {
        task.title = title.trim().to_string();
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(priority) = input.priority {
        task.priority = priority;
    }
    if let Some(category) = input.category {
        task.category = category;
    }
    if let Some(due_date) = input.due_date {
        task.due_date = Some(due_date).filter(|d| !d.is_empty());
    }
    if let Some(tags) = input.tags {
        task.tags = tags;
    }
    if let Some(completed) = input.completed {
        task.completed = completed;
    }
    task.updated_at = Utc::now();
    ok(StatusCode::OK, &*task)
}

async fn delete_task(State(db): State<Db>, Path(id): Path<String>) -> Reply {
    let mut tasks = db.write().await;
    let Some(index) = tasks.iter().position(|t| t.id == id) else {
        return fail(StatusCode::NOT_FOUND, "task not found");
    };
    tasks.remove(index);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": "task deleted" })),
    )
}
