// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub mod errors;
pub mod mcp_stdio;
pub mod rest;
pub mod rpc;
pub mod sse;

pub use errors::RpcError;
pub use mcp_stdio::run_stdio_service;
pub use rest::{configure_routes, run_server};
