// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Library core for the Outlook MCP server.

// --- Modules ---
pub mod api;
pub mod config;
pub mod mcp;
pub mod models;
pub mod outlook;

use env_logger::{Env, Target};

/// Initializes `env_logger` on stderr. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .init();
}
