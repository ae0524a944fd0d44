// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

const GRAPH_EXPLORER_URL: &str = "https://developer.microsoft.com/en-us/graph/graph-explorer";

/// Failures of a single outbound Graph mail operation.
///
/// Classified once, at the operation boundary. The dispatch layer re-classifies
/// these into caller-facing kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutlookError {
    #[error("Access token is required. Please obtain an access token from Microsoft Graph Explorer: {}", GRAPH_EXPLORER_URL)]
    MissingCredential,

    #[error("Invalid or expired access token. Please obtain a new token from Microsoft Graph Explorer: {}", GRAPH_EXPLORER_URL)]
    InvalidCredential,

    #[error("Email with ID {id} not found.")]
    NotFound { id: String },

    #[error("Failed to {operation}: {message}")]
    Upstream {
        operation: &'static str,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OutlookError {
    pub fn upstream(operation: &'static str, message: impl Into<String>) -> Self {
        OutlookError::Upstream {
            operation,
            message: message.into(),
        }
    }

    /// True for the two credential failures that callers see as one category.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            OutlookError::MissingCredential | OutlookError::InvalidCredential
        )
    }

    /// Short tag used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            OutlookError::MissingCredential => "MissingCredential",
            OutlookError::InvalidCredential => "InvalidCredential",
            OutlookError::NotFound { .. } => "NotFound",
            OutlookError::Upstream { .. } => "UpstreamError",
            OutlookError::Internal(_) => "InternalError",
        }
    }
}

impl From<url::ParseError> for OutlookError {
    fn from(err: url::ParseError) -> Self {
        OutlookError::Internal(format!("Invalid Graph API URL: {}", err))
    }
}
