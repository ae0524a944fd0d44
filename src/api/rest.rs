// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use log::info;

use super::errors::json_error_handler;
use super::rpc::{health, rpc_handler};
use super::sse::{sse_handler, HeartbeatConfig};
use crate::config::Settings;
use crate::mcp::Dispatcher;

/// Registers `/health`, `/rpc` and `/sse`.
///
/// Expects `web::Data<Dispatcher>` and `web::Data<HeartbeatConfig>` to be
/// registered on the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health))
        .route("/rpc", web::post().to(rpc_handler))
        .route("/sse", web::get().to(sse_handler));
}

/// Any origin; GET, POST and OPTIONS; `Content-Type` and `Authorization`.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub async fn run_server(settings: &Settings, dispatcher: Arc<Dispatcher>) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", settings.host, settings.port);
    let dispatcher = web::Data::from(dispatcher);
    let heartbeat = web::Data::new(HeartbeatConfig {
        interval: Duration::from_secs(settings.sse.heartbeat_interval_secs),
    });

    info!("Outlook MCP HTTP server listening on http://{}", bind_address);
    info!("  POST /rpc    tool calls");
    info!("  GET  /sse    heartbeat stream");
    info!("  GET  /health health check");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(dispatcher.clone())
            .app_data(heartbeat.clone())
            .configure(configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
