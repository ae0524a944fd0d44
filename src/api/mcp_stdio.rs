// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! MCP over standard input/output.
//!
//! One JSON-RPC 2.0 message per line in, one response per line out. Stdout
//! carries protocol traffic only; logging goes to stderr.

use std::sync::Arc;

use futures_util::StreamExt;
use log::{debug, error, info, warn};
use serde_json::Value;
use tokio::io::{self, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

use crate::mcp::{
    error_codes::ErrorCode,
    handler::McpHandler,
    types::{JsonRpcError, JsonRpcRequest, JsonRpcResponse},
};

/// Longest accepted request line, in bytes.
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Serves MCP on the process's stdin/stdout until stdin closes.
pub async fn run_stdio_service(handler: Arc<dyn McpHandler>) -> io::Result<()> {
    info!("Starting MCP stdio service");
    let result = serve(handler, io::stdin(), io::stdout()).await;
    info!("Stdin closed, MCP stdio service exiting");
    result
}

/// The line loop, generic over the transport so tests can drive it.
pub async fn serve<R, W>(handler: Arc<dyn McpHandler>, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedRead::new(
        BufReader::new(reader),
        LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
    );

    while let Some(line) = lines.next().await {
        let response = match line {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                debug!("Received line: {}", line);
                process_line(handler.as_ref(), &line).await
            }
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                warn!("Input line exceeded {} bytes", MAX_LINE_LENGTH);
                Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::invalid_request("Input line exceeded maximum allowed length"),
                ))
            }
            Err(LinesCodecError::Io(e)) => {
                error!("Error reading from stdin: {}", e);
                return Err(e);
            }
        };

        if let Some(response) = response {
            write_response(&mut writer, &response).await?;
        }
    }

    Ok(())
}

async fn process_line(handler: &dyn McpHandler, line: &str) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unparseable input line: {}", e);
            return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error(e)));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => handler.handle_request(request).await,
        Err(e) => {
            warn!("Not a JSON-RPC request: {}", e);
            Some(JsonRpcResponse::error(
                id,
                JsonRpcError::with_detail(ErrorCode::InvalidRequest, e),
            ))
        }
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &JsonRpcResponse,
) -> io::Result<()> {
    let mut encoded = serde_json::to_string(response).map_err(io::Error::other)?;
    encoded.push('\n');
    writer.write_all(encoded.as_bytes()).await?;
    writer.flush().await
}
