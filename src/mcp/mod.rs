// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// src/mcp/mod.rs

pub mod dispatch;
pub mod error_codes;
pub mod handler;
pub mod tools;
pub mod types;

// Re-export key types/traits for easier use
pub use dispatch::{Dispatcher, FailureKind, ToolCallResult, ToolFailure, ToolOutput};
pub use error_codes::ErrorCode;
pub use handler::{McpHandler, OutlookMcpHandler};
pub use tools::{find_tool, tool_listing, ToolName, TOOLS};
pub use types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
