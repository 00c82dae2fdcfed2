//! View-state store: the in-memory task list kept in step with the server.
//!
//! # Design
//! - The list only changes after a successful API call, by wholesale
//!   replacement (`reload`) or whole-element substitution/removal. A failed
//!   call leaves the list exactly as it was and records the error.
//! - Mutating operations take `&mut self`, so one action runs to completion
//!   before the next can start; overlapping actions cannot be expressed.
//! - The task being edited is referenced by id, never by a second copy.
//! - `visible()` and `counts()` are recomputed on every read.

use tracing::{debug, info};

use crate::api::TaskApi;
use crate::error::ApiError;
use crate::form::TaskForm;
use crate::transport::Transport;
use crate::types::{Counts, Filter, Task, TaskDraft, TaskPatch};

/// Which form, if any, is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Hidden,
    Adding,
    Editing { id: String },
}

pub struct TaskStore<T> {
    api: TaskApi<T>,
    tasks: Vec<Task>,
    form: FormMode,
    filter: Filter,
    loading: bool,
    error: Option<ApiError>,
}

impl<T: Transport> TaskStore<T> {
    /// An empty store. Call [`TaskStore::reload`] to populate it.
    pub fn new(api: TaskApi<T>) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            form: FormMode::Hidden,
            filter: Filter::All,
            loading: false,
            error: None,
        }
    }

    pub fn api(&self) -> &TaskApi<T> {
        &self.api
    }

    /// All tasks in list order, regardless of the filter.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent failure, until dismissed or a later action succeeds.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(ApiError::message)
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn form_mode(&self) -> &FormMode {
        &self.form
    }

    /// Id of the task whose edit form is open.
    pub fn editing(&self) -> Option<&str> {
        match &self.form {
            FormMode::Editing { id } => Some(id),
            _ => None,
        }
    }

    pub fn begin_add(&mut self) {
        self.form = FormMode::Adding;
    }

    /// Open the edit form for `id` and return it pre-filled. Returns `None`
    /// and leaves the form mode alone when no such task is loaded.
    pub fn begin_edit(&mut self, id: &str) -> Option<TaskForm> {
        let form = TaskForm::from_task(self.task(id)?);
        self.form = FormMode::Editing { id: id.to_string() };
        Some(form)
    }

    pub fn cancel_form(&mut self) {
        self.form = FormMode::Hidden;
    }

    /// Tasks passing the current filter, in list order.
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| self.filter.matches(t)).collect()
    }

    pub fn counts(&self) -> Counts {
        Counts::of(&self.tasks)
    }

    /// Replace the whole list with the server's.
    pub async fn reload(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;
        let result = self.api.list().await;
        self.loading = false;
        match result {
            Ok(tasks) => {
                info!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Manual retry after a failure: a full reload.
    pub async fn retry(&mut self) -> Result<(), ApiError> {
        self.reload().await
    }

    /// Create a task and prepend it. A blank title is rejected without a
    /// request. On success an open add form closes; on failure it stays.
    pub async fn add(&mut self, draft: TaskDraft) -> Result<Task, ApiError> {
        if let Err(e) = draft.validate() {
            return Err(self.fail(e));
        }
        match self.api.create(&draft).await {
            Ok(task) => {
                debug!(id = %task.id, "task created");
                self.tasks.insert(0, task.clone());
                if self.form == FormMode::Adding {
                    self.form = FormMode::Hidden;
                }
                self.error = None;
                Ok(task)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Update a task and substitute the server's copy for the entry with the
    /// same id. On success the edit form closes.
    pub async fn edit(&mut self, id: &str, patch: TaskPatch) -> Result<Task, ApiError> {
        if let Err(e) = patch.validate() {
            return Err(self.fail(e));
        }
        let task = self.update(id, &patch).await?;
        if matches!(self.form, FormMode::Editing { .. }) {
            self.form = FormMode::Hidden;
        }
        Ok(task)
    }

    /// Flip `completed` without touching any open form.
    pub async fn toggle(&mut self, id: &str, completed: bool) -> Result<Task, ApiError> {
        self.update(id, &TaskPatch::completed(completed)).await
    }

    pub async fn remove(&mut self, id: &str) -> Result<(), ApiError> {
        match self.api.delete(id).await {
            Ok(_) => {
                debug!(id, "task deleted");
                self.tasks.retain(|t| t.id != id);
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Send the form as a create or an edit, depending on which form is
    /// open. With no form open it is treated as a create.
    pub async fn submit(&mut self, form: &TaskForm) -> Result<Task, ApiError> {
        match self.form.clone() {
            FormMode::Editing { id } => match form.to_patch() {
                Ok(patch) => self.edit(&id, patch).await,
                Err(e) => Err(self.fail(e)),
            },
            FormMode::Adding | FormMode::Hidden => match form.to_draft() {
                Ok(draft) => self.add(draft).await,
                Err(e) => Err(self.fail(e)),
            },
        }
    }

    async fn update(&mut self, id: &str, patch: &TaskPatch) -> Result<Task, ApiError> {
        match self.api.update(id, patch).await {
            Ok(task) => {
                debug!(id, "task updated");
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
                    *slot = task.clone();
                }
                self.error = None;
                Ok(task)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, error: ApiError) -> ApiError {
        self.error = Some(error.clone());
        error
    }
}
