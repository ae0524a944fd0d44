// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// src/mcp/handler.rs

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use serde_json::{json, Value};

use super::dispatch::{Dispatcher, FailureKind, ToolFailure};
use super::error_codes::ErrorCode;
use super::tools::tool_listing;
use super::types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

pub const SERVER_NAME: &str = "outlook-mcp";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// Asynchronous interface for handling MCP (JSON-RPC 2.0) requests.
///
/// Transport adapters parse a line or body into a [`JsonRpcRequest`] and hand
/// it here. Notifications produce no response.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait McpHandler: Send + Sync {
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse>;
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// MCP lifecycle plus `tools/*` methods over the mail dispatcher.
pub struct OutlookMcpHandler {
    dispatcher: Arc<Dispatcher>,
}

impl OutlookMcpHandler {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    fn initialize(&self, params: Option<&Value>) -> Value {
        let protocol_version = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);
        info!("MCP session initialized (protocol {})", protocol_version);
        json!({
            "protocolVersion": protocol_version,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ToolCallParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| {
                JsonRpcError::new(
                    ErrorCode::InvalidParams,
                    format!("Invalid tools/call params: {}", e),
                )
            })?;

        let output = self
            .dispatcher
            .dispatch(&params.name, params.arguments)
            .await
            .map_err(|failure| match failure.kind {
                FailureKind::UnknownMethod => JsonRpcError::new(
                    ErrorCode::MethodNotFound,
                    format!("Unknown tool: {}", params.name),
                ),
                _ => failure_to_rpc(failure),
            })?;
        let text = output
            .to_text()
            .map_err(|e| JsonRpcError::internal_error(format!("Failed to render result: {}", e)))?;

        Ok(json!({ "content": [{ "type": "text", "text": text }] }))
    }
}

fn failure_to_rpc(failure: ToolFailure) -> JsonRpcError {
    JsonRpcError::new(ErrorCode::from(failure.kind), failure.message)
}

#[async_trait]
impl McpHandler for OutlookMcpHandler {
    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!("Notification received: {}", request.method);
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize(request.params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_listing() })),
            "tools/call" => self.call_tool(request.params).await,
            other => {
                warn!("Unsupported MCP method: {}", other);
                Err(JsonRpcError::method_not_found(other))
            }
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }
}
