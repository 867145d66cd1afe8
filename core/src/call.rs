//! Declared operations.
//!
//! # Design
//! A `Call<R>` is everything one operation needs: endpoint, parameters,
//! serialized body and the diagnostic [`Context`]. It can build the request
//! and interpret the response without any I/O, so the same value drives
//! both [`crate::IncapsulaClient::execute`] and host-does-IO callers that
//! run the round trip themselves.

use std::marker::PhantomData;

use serde::Serialize;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::request::RequestBuilder;
use crate::response::{self, Reply};

/// Phrases that make every error message self-describing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Noun used when the payload cannot be serialized, e.g. `Role`.
    pub entity: &'static str,
    /// Completes "when ...", e.g. `reading Role 123`.
    pub action: String,
    /// Completes "Error parsing ...", e.g. `Role 123 JSON response`.
    pub subject: String,
    /// Completes "Error deleting ..." for refused deletes.
    pub refusal: String,
}

impl Context {
    pub fn new(
        entity: &'static str,
        action: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        let subject = subject.into();
        Self {
            entity,
            action: action.into(),
            refusal: subject.clone(),
            subject,
        }
    }

    pub fn refused_as(mut self, refusal: impl Into<String>) -> Self {
        self.refusal = refusal.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Call<R> {
    endpoint: &'static Endpoint,
    path: Vec<(&'static str, String)>,
    query: Vec<(&'static str, String)>,
    body: Option<String>,
    context: Context,
    reply: PhantomData<fn() -> R>,
}

impl<R: Reply> Call<R> {
    pub fn new(endpoint: &'static Endpoint, context: Context) -> Self {
        Self {
            endpoint,
            path: Vec::new(),
            query: Vec::new(),
            body: None,
            context,
            reply: PhantomData,
        }
    }

    pub fn path_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.path.push((name, value.to_string()));
        self
    }

    pub fn query_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    /// Serialize `body` now; a failure here means nothing is ever sent.
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let json = serde_json::to_string(body).map_err(|source| ApiError::Serialization {
            entity: self.context.entity,
            source,
        })?;
        self.body = Some(json);
        Ok(self)
    }

    pub fn endpoint(&self) -> &'static Endpoint {
        self.endpoint
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn build(&self, config: &ClientConfig) -> Result<HttpRequest, ApiError> {
        let mut builder = RequestBuilder::new(config, self.endpoint);
        for (name, value) in &self.path {
            builder = builder.path_param(*name, value);
        }
        for (name, value) in &self.query {
            builder = builder.query_param(*name, value);
        }
        if let Some(body) = &self.body {
            builder = builder.body(body.as_str());
        }
        builder.build(&self.context.action)
    }

    pub fn interpret(&self, response: HttpResponse) -> Result<R, ApiError> {
        response::interpret(&self.context, response)
    }
}
