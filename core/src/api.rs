//! Asynchronous task API: `TaskClient` wired to a `Transport`.
//!
//! Each method builds a request, awaits the round-trip and parses the
//! response. A transport failure becomes an `ErrorKind::Connection` error
//! naming the configured host and port.

use tracing::{debug, warn};

use crate::client::{DeleteConfirmation, TaskClient};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Task, TaskDraft, TaskPatch};

#[derive(Debug, Clone)]
pub struct TaskApi<T> {
    client: TaskClient,
    transport: T,
}

impl TaskApi<UreqTransport> {
    /// API over real HTTP.
    pub fn connect(config: ClientConfig) -> Self {
        Self::new(config, UreqTransport::new())
    }
}

impl<T: Transport> TaskApi<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: TaskClient::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.client.config()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.round_trip(self.client.build_list_tasks()).await?;
        self.client
            .parse_list_tasks(response)
            .inspect_err(|e| warn!(kind = %e.kind(), error = %e, "list failed"))
    }

    pub async fn create(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let response = self.round_trip(self.client.build_create_task(draft)?).await?;
        self.client
            .parse_create_task(response)
            .inspect_err(|e| warn!(kind = %e.kind(), error = %e, "create failed"))
    }

    pub async fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task, ApiError> {
        let response = self.round_trip(self.client.build_update_task(id, patch)?).await?;
        self.client
            .parse_update_task(response)
            .inspect_err(|e| warn!(id, kind = %e.kind(), error = %e, "update failed"))
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteConfirmation, ApiError> {
        let response = self.round_trip(self.client.build_delete_task(id)).await?;
        self.client
            .parse_delete_task(response)
            .inspect_err(|e| warn!(id, kind = %e.kind(), error = %e, "delete failed"))
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        match self.transport.execute(request).await {
            Ok(response) => {
                debug!(status = response.status, "received response");
                Ok(response)
            }
            Err(e) => {
                let endpoint = self.client.config().endpoint();
                warn!(%endpoint, error = %e, "task server unreachable");
                Err(ApiError::connection(&endpoint, e))
            }
        }
    }
}
