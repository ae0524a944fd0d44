// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Transport-neutral tool dispatch.
//!
//! Both the stdio MCP server and the HTTP `/rpc` endpoint hand every call to
//! [`Dispatcher::dispatch`]. It resolves the tool from the static catalog,
//! rejects missing required arguments before any network traffic, fills the
//! catalog defaults, runs the mail operation and shapes the payload. Failures
//! come back as a [`ToolFailure`] whose [`FailureKind`] each front-end maps
//! onto its own error vocabulary.

use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::email::{EmailDetail, EmailSummary};
use crate::outlook::{
    CredentialHolder, ListQuery, MailApi, Message, OutlookClient, OutlookError,
};

use super::tools::{find_tool, ParamDefault, ParamSpec, Requirement, ToolName, ToolSpec};

pub const AUTH_REQUIRED_MESSAGE: &str =
    "Please set a valid Microsoft Graph API access token first using the set_access_token tool.";
pub const TOKEN_SET_CONFIRMATION: &str = "Access token has been set successfully.";

/// Caller-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    InvalidParams,
    /// Covers both a missing and a rejected token.
    AuthRequired,
    UnknownMethod,
    NotFound,
    UpstreamError,
    InternalError,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ToolFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ToolFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidParams, message)
    }

    pub fn unknown_method(name: &str) -> Self {
        Self::new(FailureKind::UnknownMethod, format!("Unknown method: {}", name))
    }

    pub fn auth_required() -> Self {
        Self::new(FailureKind::AuthRequired, AUTH_REQUIRED_MESSAGE)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InternalError, message)
    }
}

impl From<OutlookError> for ToolFailure {
    fn from(err: OutlookError) -> Self {
        match err {
            OutlookError::MissingCredential | OutlookError::InvalidCredential => {
                // The distinction only survives in the log.
                warn!("Authentication required ({}): {}", err.kind(), err);
                ToolFailure::auth_required()
            }
            OutlookError::NotFound { .. } => ToolFailure::new(FailureKind::NotFound, err.to_string()),
            OutlookError::Upstream { .. } => {
                ToolFailure::new(FailureKind::UpstreamError, err.to_string())
            }
            OutlookError::Internal(_) => ToolFailure::internal(err.to_string()),
        }
    }
}

/// Successful payload of a tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// A confirmation sentence.
    Text(String),
    /// Projected email data.
    Json(Value),
}

impl ToolOutput {
    /// Text form used in MCP content blocks; JSON is pretty-printed.
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        match self {
            ToolOutput::Text(text) => Ok(text.clone()),
            ToolOutput::Json(value) => serde_json::to_string_pretty(value),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ToolOutput::Text(text) => Value::String(text),
            ToolOutput::Json(value) => value,
        }
    }
}

pub type ToolCallResult = Result<ToolOutput, ToolFailure>;

// --- Typed arguments, decoded after defaults are filled ---

#[derive(Debug, Deserialize)]
struct SetAccessTokenArgs {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ListEmailsArgs {
    top: u32,
    skip: Option<u32>,
    filter: Option<String>,
    #[serde(rename = "orderBy")]
    order_by: String,
    search: Option<String>,
    select: Option<String>,
}

impl From<ListEmailsArgs> for ListQuery {
    fn from(args: ListEmailsArgs) -> Self {
        ListQuery {
            top: Some(args.top),
            skip: args.skip,
            filter: args.filter,
            order_by: Some(args.order_by),
            select: args.select,
            search: args.search,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageArgs {
    message_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchEmailsArgs {
    query: String,
    top: u32,
}

#[derive(Debug, Deserialize)]
struct MarkAsReadArgs {
    message_id: String,
    is_read: bool,
}

/// Routes tool calls to the mail operations.
pub struct Dispatcher {
    credentials: Arc<CredentialHolder>,
    mail: Arc<dyn MailApi>,
}

impl Dispatcher {
    pub fn new(credentials: Arc<CredentialHolder>, mail: Arc<dyn MailApi>) -> Self {
        Self { credentials, mail }
    }

    /// Dispatcher backed by a Graph client at `base_url` with a fresh,
    /// empty credential holder.
    pub fn for_graph(base_url: &str) -> Result<Self, OutlookError> {
        let credentials = Arc::new(CredentialHolder::new());
        let client = OutlookClient::new(base_url, Arc::clone(&credentials))?;
        Ok(Self::new(credentials, Arc::new(client)))
    }

    pub fn credentials(&self) -> &Arc<CredentialHolder> {
        &self.credentials
    }

    pub async fn dispatch(&self, name: &str, params: Value) -> ToolCallResult {
        let spec = find_tool(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolFailure::unknown_method(name)
        })?;
        debug!("Dispatching tool '{}'", name);

        let args = prepare_arguments(spec, params)?;
        let result = self.invoke(spec.tool, args).await;
        match &result {
            Ok(_) => debug!("Tool '{}' completed", name),
            Err(failure) if failure.kind == FailureKind::InternalError => {
                error!("Tool '{}' failed: {}", name, failure)
            }
            Err(failure) => warn!("Tool '{}' failed ({:?}): {}", name, failure.kind, failure),
        }
        result
    }

    async fn invoke(&self, tool: ToolName, args: Map<String, Value>) -> ToolCallResult {
        match tool {
            ToolName::SetAccessToken => {
                let args: SetAccessTokenArgs = decode(tool, args)?;
                self.credentials.set(args.access_token);
                info!("Access token updated");
                Ok(ToolOutput::Text(TOKEN_SET_CONFIRMATION.to_string()))
            }
            ToolName::ListEmails => {
                let args: ListEmailsArgs = decode(tool, args)?;
                let messages = self.mail.list_emails(args.into()).await?;
                summaries(&messages)
            }
            ToolName::GetEmail => {
                let args: MessageArgs = decode(tool, args)?;
                let message = self.mail.get_email(&args.message_id).await?;
                to_json(&EmailDetail::from(&message))
            }
            ToolName::SearchEmails => {
                let args: SearchEmailsArgs = decode(tool, args)?;
                let messages = self.mail.search_emails(&args.query, args.top).await?;
                summaries(&messages)
            }
            ToolName::MarkAsRead => {
                let args: MarkAsReadArgs = decode(tool, args)?;
                self.mail.mark_as_read(&args.message_id, args.is_read).await?;
                let state = if args.is_read { "read" } else { "unread" };
                Ok(ToolOutput::Text(format!(
                    "Email {} has been marked as {}.",
                    args.message_id, state
                )))
            }
            ToolName::DeleteEmail => {
                let args: MessageArgs = decode(tool, args)?;
                self.mail.delete_email(&args.message_id).await?;
                Ok(ToolOutput::Text(format!("Email {} has been deleted.", args.message_id)))
            }
        }
    }
}

/// Checks required arguments and fills catalog defaults.
///
/// `null` stands for "no arguments". Required arguments that are absent,
/// `null` or an empty string are rejected with the catalog's message.
/// Optional arguments that are absent or `null` take their default, as does
/// a `0` given for a numeric argument with a default.
fn prepare_arguments(spec: &ToolSpec, params: Value) -> Result<Map<String, Value>, ToolFailure> {
    let mut args = match params {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(ToolFailure::invalid_params(format!(
                "Parameters for {} must be an object",
                spec.name()
            )))
        }
    };

    for param in spec.params {
        let present = args.get(param.name).map_or(false, |v| !is_unset(param, v));
        if present {
            continue;
        }
        match param.requirement {
            Requirement::Required { missing_message } => {
                return Err(ToolFailure::invalid_params(missing_message));
            }
            Requirement::Optional { default: Some(default) } => {
                args.insert(param.name.to_string(), default.to_value());
            }
            Requirement::Optional { default: None } => {}
        }
    }
    Ok(args)
}

fn is_unset(param: &ParamSpec, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => {
            matches!(param.default_value(), Some(ParamDefault::Number(_))) && n.as_f64() == Some(0.0)
        }
        _ => false,
    }
}

fn decode<T: DeserializeOwned>(tool: ToolName, args: Map<String, Value>) -> Result<T, ToolFailure> {
    serde_json::from_value(Value::Object(args)).map_err(|e| {
        ToolFailure::invalid_params(format!("Invalid arguments for {}: {}", tool.as_str(), e))
    })
}

fn summaries(messages: &[Message]) -> ToolCallResult {
    let summaries: Vec<EmailSummary> = messages.iter().map(EmailSummary::from).collect();
    to_json(&summaries)
}

fn to_json<T: Serialize>(payload: &T) -> ToolCallResult {
    serde_json::to_value(payload)
        .map(ToolOutput::Json)
        .map_err(|e| ToolFailure::internal(format!("Failed to serialize result: {}", e)))
}
