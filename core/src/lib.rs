//! Typed client for the Incapsula (Imperva) user-management API.
//!
//! # Overview
//! Roles and users are managed through CRUD calls that all share one
//! pipeline: build an authenticated request, perform one blocking round
//! trip, classify the response, decode the body.
//!
//! # Design
//! - Requests and responses are plain data (`http`), so the pipeline can be
//!   driven without a network: `Call::build` / `Call::interpret`.
//! - Entity operations (`roles`, `users`) are declarations over `Call`:
//!   endpoint, parameters, payload and the phrases used in error messages.
//! - Failures are an `ApiError` with one variant per cause (request,
//!   transport, status, decode, semantic), each keeping the raw response
//!   body in its message.
//! - `IncapsulaClient` owns the config and a `Transport`; the default is a
//!   blocking `ureq` agent shared by every call.

pub mod call;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod roles;
pub mod transport;
pub mod types;
pub mod users;

pub use call::{Call, Context};
pub use client::IncapsulaClient;
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::{ApiError, BoxError, ConfigError, ErrorKind};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{DeleteOutcome, Reply};
pub use transport::{Transport, UreqTransport};
pub use types::{CreateRole, CreateUser, Envelope, Role, RoleSummary, UpdateRole, User, UserAssignment};
