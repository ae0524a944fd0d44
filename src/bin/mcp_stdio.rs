// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// MCP stdio server - exposes the Outlook mail tools as MCP tools over stdin/stdout.
///
/// Stdout carries JSON-RPC only; all diagnostics go to stderr.
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use outlook_mcp::{
    api::run_stdio_service,
    config::Settings,
    init_logging,
    mcp::{Dispatcher, McpHandler, OutlookMcpHandler},
};

#[derive(Parser, Debug)]
#[command(version, about = "Outlook mail tools as an MCP server on stdin/stdout", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Microsoft Graph base URL (overrides configuration).
    #[arg(long)]
    graph_base_url: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = match Settings::new(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(base_url) = cli.graph_base_url {
        settings.graph.base_url = base_url;
    }

    init_logging(&settings.log.level);
    info!("Outlook MCP server running on stdio");

    let dispatcher = match Dispatcher::for_graph(&settings.graph.base_url) {
        Ok(dispatcher) => Arc::new(dispatcher),
        Err(e) => {
            error!("Failed to create Graph client: {}", e);
            std::process::exit(1);
        }
    };
    let handler: Arc<dyn McpHandler> = Arc::new(OutlookMcpHandler::new(dispatcher));

    if let Err(e) = run_stdio_service(handler).await {
        error!("MCP stdio service failed: {}", e);
        std::process::exit(1);
    }
}
