// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use super::dispatch::FailureKind;

/// Standard JSON-RPC 2.0 error codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError = -32700,
    InvalidRequest = -32600,
    MethodNotFound = -32601,
    InvalidParams = -32602,
    InternalError = -32603,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

impl From<FailureKind> for ErrorCode {
    /// Protocol code for a failed tool call. Authentication failures are
    /// reported as invalid params: the caller has to supply a token.
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::InvalidParams | FailureKind::AuthRequired => ErrorCode::InvalidParams,
            FailureKind::UnknownMethod => ErrorCode::MethodNotFound,
            FailureKind::NotFound | FailureKind::UpstreamError | FailureKind::InternalError => {
                ErrorCode::InternalError
            }
        }
    }
}

// Constants for common error codes
pub const PARSE_ERROR: i32 = ErrorCode::ParseError as i32;
pub const INVALID_REQUEST: i32 = ErrorCode::InvalidRequest as i32;
pub const METHOD_NOT_FOUND: i32 = ErrorCode::MethodNotFound as i32;
pub const INVALID_PARAMS: i32 = ErrorCode::InvalidParams as i32;
pub const INTERNAL_ERROR: i32 = ErrorCode::InternalError as i32;
