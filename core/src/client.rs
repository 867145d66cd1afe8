//! Blocking client for the Incapsula user-management API.
//!
//! # Design
//! `IncapsulaClient` owns the immutable [`ClientConfig`] and one
//! [`Transport`]. Every operation is a declared [`Call`] executed by the same
//! pipeline: build the request, one round trip, interpret the response. No
//! retries, caching or batching happen here; a failed call is terminal and
//! the caller decides what to do with its [`ApiError`].

use crate::call::Call;
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};
use crate::response::Reply;
use crate::roles;
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateRole, CreateUser, Role, UpdateRole, User};
use crate::users;

#[derive(Debug, Clone)]
pub struct IncapsulaClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl IncapsulaClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self { config, transport }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        ClientConfig::from_env().map(Self::new)
    }
}

impl<T: Transport> IncapsulaClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one declared call through the pipeline.
    pub fn execute<R: Reply>(&self, call: &Call<R>) -> Result<R, ApiError> {
        let operation = call.endpoint().name;
        let context = call.context();
        tracing::info!(operation, action = %context.action, "Calling Incapsula service");
        if let Some(body) = call.body() {
            tracing::debug!(operation, body, "Incapsula request body");
        }

        let request = call.build(&self.config)?;
        let response = self
            .transport
            .send(&request)
            .map_err(|source| ApiError::Transport {
                action: context.action.clone(),
                source,
            })
            .inspect_err(|e| tracing::warn!(operation, error = %e, "Incapsula request failed"))?;

        tracing::debug!(
            operation,
            status = response.status,
            body = %response.body,
            "Incapsula response"
        );

        call.interpret(response).inspect_err(|e| {
            tracing::warn!(operation, kind = ?e.kind(), error = %e, "Incapsula call failed")
        })
    }

    pub fn add_role(&self, role: &CreateRole) -> Result<Role, ApiError> {
        self.execute(&roles::add(role)?)
    }

    pub fn get_role(&self, role_id: u64) -> Result<Role, ApiError> {
        self.execute(&roles::get(role_id))
    }

    pub fn update_role(&self, role_id: u64, role: &UpdateRole) -> Result<Role, ApiError> {
        self.execute(&roles::update(role_id, role)?)
    }

    pub fn delete_role(&self, role_id: u64) -> Result<(), ApiError> {
        self.execute(&roles::delete(role_id))
    }

    pub fn add_user(&self, user: &CreateUser) -> Result<User, ApiError> {
        self.execute(&users::add(user)?)
    }

    pub fn get_user(&self, user_email: &str, account_id: u64) -> Result<User, ApiError> {
        self.execute(&users::get(user_email, account_id))
    }

    pub fn delete_user(&self, user_email: &str, account_id: u64) -> Result<(), ApiError> {
        self.execute(&users::delete(user_email, account_id))
    }
}
