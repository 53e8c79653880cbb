//! Client core for a remote todo list.
//!
//! # Overview
//! Fetches todos and users from a REST service, keeps a session copy of
//! them, and maintains a DOM-equivalent page that the user drives through
//! submit, toggle and delete events. Every action is synchronized back to
//! the service before local state changes.
//!
//! # Design
//! - `TodoClient` is a stateless codec: `build_*` produces requests and
//!   `parse_*` consumes responses, so the I/O boundary is explicit.
//! - A `Transport` executes requests; `UreqTransport` is the blocking
//!   network implementation.
//! - `DataFetcher` applies the failure policy: lists fail open, mutations
//!   return typed errors.
//! - `Controller` owns the `StateStore` and the `PageView` and is the only
//!   place either is mutated.

pub mod client;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use config::{Config, ConfigError};
pub use controller::Controller;
pub use dispatch::{ElementId, Handler, UiEvent};
pub use error::{ApiError, AppError, ViewError};
pub use fetcher::DataFetcher;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::StateStore;
pub use transport::{Transport, UreqTransport};
pub use types::{CompletionPatch, Todo, TodoDraft, TodoId, User, UserId};
pub use view::{PageView, TodoItemView, UserOption};
