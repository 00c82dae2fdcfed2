//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Every response travels in the same envelope,
//! `{success, data?, error?}`, so parsing is one routine: classify the status,
//! decode the envelope, then check its `success` flag.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Task, TaskDraft, TaskPatch};

const LIST_FAILED: &str = "failed to load tasks";
const CREATE_FAILED: &str = "failed to create the task";
const UPDATE_FAILED: &str = "failed to update the task";
const DELETE_FAILED: &str = "failed to delete the task";

/// Body of a successful delete: the server's short confirmation message,
/// if it sent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub message: Option<String>,
}

/// Synchronous, stateless client for the task API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct TaskClient {
    config: ClientConfig,
}

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    error: Option<String>,
    message: Option<String>,
}

impl TaskClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        request(HttpMethod::Get, self.config.collection_url(), None)
    }

    pub fn build_create_task(&self, draft: &TaskDraft) -> Result<HttpRequest, ApiError> {
        let body = to_json(draft)?;
        Ok(request(HttpMethod::Post, self.config.collection_url(), Some(body)))
    }

    pub fn build_update_task(&self, id: &str, patch: &TaskPatch) -> Result<HttpRequest, ApiError> {
        let body = to_json(patch)?;
        Ok(request(HttpMethod::Patch, self.config.item_url(id), Some(body)))
    }

    pub fn build_delete_task(&self, id: &str) -> HttpRequest {
        request(HttpMethod::Delete, self.config.item_url(id), None)
    }

    /// A missing `data` field on a successful list means "no tasks".
    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        let envelope: Envelope<Vec<Task>> = open(&response, LIST_FAILED)?;
        Ok(envelope.data.unwrap_or_default())
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        let envelope: Envelope<Task> = open(&response, CREATE_FAILED)?;
        require_task(envelope, &response)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        let envelope: Envelope<Task> = open(&response, UPDATE_FAILED)?;
        require_task(envelope, &response)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<DeleteConfirmation, ApiError> {
        let envelope: Envelope<IgnoredAny> = open(&response, DELETE_FAILED)?;
        Ok(DeleteConfirmation {
            message: envelope.message,
        })
    }
}

fn request(method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
    let mut headers = vec![("accept".to_string(), "application/json".to_string())];
    if body.is_some() {
        headers.push(("content-type".to_string(), "application/json".to_string()));
    }
    HttpRequest {
        method,
        url,
        headers,
        body,
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(ApiError::encode)
}

/// Classify the status, decode the envelope and check its `success` flag.
/// `fallback` is the message used when a failed envelope names no error.
fn open<T: DeserializeOwned>(response: &HttpResponse, fallback: &str) -> Result<Envelope<T>, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_status(response.status, &response.body));
    }
    let envelope: Envelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::decode(e, response.status, &response.body))?;
    if !envelope.success {
        let message = envelope
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::application(message, response.status, &response.body));
    }
    Ok(envelope)
}

fn require_task(envelope: Envelope<Task>, response: &HttpResponse) -> Result<Task, ApiError> {
    envelope
        .data
        .ok_or_else(|| ApiError::decode("response carried no task", response.status, &response.body))
}
