//! Client-side data-sync layer for the task service.
//!
//! # Overview
//! `TaskClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `TaskApi` pairs it
//! with a `Transport` to run the round-trips asynchronously, and `TaskStore`
//! keeps an in-memory task list consistent with the server, one action at a
//! time.
//!
//! # Design
//! - `TaskClient` is stateless; it holds only its `ClientConfig`.
//! - Every failure is one `ApiError` with an `ErrorKind`, a display-ready
//!   message, and the HTTP status and body when there was a response.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use api::TaskApi;
pub use client::{DeleteConfirmation, TaskClient};
pub use config::{ClientConfig, ConfigError, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorKind};
pub use form::TaskForm;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{FormMode, TaskStore};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{parse_tags, Counts, Filter, ParseEnumError, Priority, Task, TaskDraft, TaskPatch};
