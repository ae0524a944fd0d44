// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error envelope for the HTTP front-end.
//!
//! Every failure leaves the server as `{"error": "<message>"}`. The status
//! code is a fixed mapping from [`FailureKind`].

use actix_web::{
    error::{JsonPayloadError, ResponseError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mcp::{FailureKind, ToolFailure};

pub const INVALID_PARAMS_STATUS: StatusCode = StatusCode::BAD_REQUEST;
pub const AUTH_REQUIRED_STATUS: StatusCode = StatusCode::UNAUTHORIZED;
pub const UNKNOWN_METHOD_STATUS: StatusCode = StatusCode::NOT_FOUND;
pub const FAILURE_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("{0}")]
    Tool(#[from] ToolFailure),

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

impl RpcError {
    fn message(&self) -> String {
        match self {
            RpcError::Tool(failure) => failure.message.clone(),
            RpcError::MalformedBody(_) => self.to_string(),
        }
    }
}

pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::InvalidParams => INVALID_PARAMS_STATUS,
        FailureKind::AuthRequired => AUTH_REQUIRED_STATUS,
        FailureKind::UnknownMethod => UNKNOWN_METHOD_STATUS,
        FailureKind::NotFound | FailureKind::UpstreamError | FailureKind::InternalError => {
            FAILURE_STATUS
        }
    }
}

impl ResponseError for RpcError {
    fn status_code(&self) -> StatusCode {
        match self {
            RpcError::Tool(failure) => status_for(failure.kind),
            RpcError::MalformedBody(_) => INVALID_PARAMS_STATUS,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.message()))
    }
}

/// `JsonConfig` error handler so malformed bodies get the same envelope.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected body for {}: {}", req.path(), err);
    RpcError::MalformedBody(err.to_string()).into()
}
