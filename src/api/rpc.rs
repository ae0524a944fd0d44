// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use actix_web::{web, HttpResponse};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::RpcError;
use crate::mcp::Dispatcher;

pub const SERVICE_NAME: &str = "outlook-mcp-http";

/// Body of `POST /rpc`. A missing `method` is dispatched as an empty name
/// and reported as an unknown method.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResult {
    pub result: Value,
}

pub async fn rpc_handler(
    dispatcher: web::Data<Dispatcher>,
    body: web::Json<RpcRequest>,
) -> Result<HttpResponse, RpcError> {
    let RpcRequest { method, params } = body.into_inner();
    debug!("HTTP rpc call: {}", method);

    let output = dispatcher.dispatch(&method, params).await?;
    Ok(HttpResponse::Ok().json(RpcResult {
        result: output.into_value(),
    }))
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
