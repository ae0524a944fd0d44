// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use outlook_mcp::{api::run_server, config::Settings, init_logging, mcp::Dispatcher};

#[derive(Parser, Debug)]
#[command(version, about = "Outlook mail tools over HTTP JSON-RPC with an SSE heartbeat", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Listening port (overrides configuration).
    #[arg(short, long)]
    port: Option<u16>,

    /// Microsoft Graph base URL (overrides configuration).
    #[arg(long)]
    graph_base_url: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = match Settings::new(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if let Some(base_url) = cli.graph_base_url {
        settings.graph.base_url = base_url;
    }

    init_logging(&settings.log.level);
    info!("Graph API base URL: {}", settings.graph.base_url);

    let dispatcher = match Dispatcher::for_graph(&settings.graph.base_url) {
        Ok(dispatcher) => Arc::new(dispatcher),
        Err(e) => {
            error!("Failed to create Graph client: {}", e);
            std::process::exit(1);
        }
    };

    run_server(&settings, dispatcher).await
}
