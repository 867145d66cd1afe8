//! Response interpreter.
//!
//! # Design
//! Classification is ordered and stops at the first failure:
//! 1. status must be exactly 200 (the API never uses 201/204), otherwise
//!    `Status` with the raw body;
//! 2. the body must decode into the expected shape, otherwise `Decode` with
//!    the serde cause and the raw body;
//! 3. delete replies additionally map the decoded [`Envelope`] to a
//!    [`DeleteOutcome`]; anything but application code 200 is `Rejected`.
//!
//! What "success" means for a body is chosen per shape through [`Reply`].

use serde::de::DeserializeOwned;

use crate::call::Context;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::types::Envelope;

pub const SUCCESS_STATUS: u16 = 200;
pub const SUCCESS_CODE: i64 = 200;

/// A shape a successful response body can be turned into.
pub trait Reply: Sized {
    fn from_body(context: &Context, body: &str) -> Result<Self, ApiError>;
}

/// Classify `response` and turn its body into `R`.
pub fn interpret<R: Reply>(context: &Context, response: HttpResponse) -> Result<R, ApiError> {
    check_status(context, &response)?;
    R::from_body(context, &response.body)
}

pub fn check_status(context: &Context, response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == SUCCESS_STATUS {
        return Ok(());
    }
    Err(ApiError::Status {
        action: context.action.clone(),
        status: response.status,
        body: response.body.clone(),
    })
}

pub fn decode<T: DeserializeOwned>(context: &Context, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        subject: context.subject.clone(),
        source,
        body: body.to_string(),
    })
}

/// What a decoded delete envelope says happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Confirmed,
    /// `code` is `None` when the envelope carried no code at all.
    Refused { code: Option<i64>, message: String },
}

impl Envelope {
    /// A missing code is a refusal, not a success.
    pub fn outcome(&self) -> DeleteOutcome {
        match self.code {
            Some(SUCCESS_CODE) => DeleteOutcome::Confirmed,
            code => DeleteOutcome::Refused {
                code,
                message: self.message.clone(),
            },
        }
    }
}

/// Delete operations reply with an envelope and return nothing on success.
impl Reply for () {
    fn from_body(context: &Context, body: &str) -> Result<Self, ApiError> {
        let envelope: Envelope = decode(context, body)?;
        match envelope.outcome() {
            DeleteOutcome::Confirmed => Ok(()),
            DeleteOutcome::Refused { code, message } => Err(ApiError::Rejected {
                subject: context.refusal.clone(),
                code,
                message,
                body: body.to_string(),
            }),
        }
    }
}
