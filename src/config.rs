// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::env;

use config::{Environment, File};
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::sse::DEFAULT_HEARTBEAT_INTERVAL;
use crate::outlook::DEFAULT_GRAPH_BASE_URL;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
const ENV_PREFIX: &str = "OUTLOOK_MCP";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SseConfig {
    pub heartbeat_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub graph: GraphConfig,
    pub sse: SseConfig,
    pub log: LogConfig,
}

/// Direct environment overrides, applied last.
const DIRECT_OVERRIDES: [(&str, &str); 5] = [
    ("HOST", "host"),
    ("PORT", "port"),
    ("GRAPH_BASE_URL", "graph.base_url"),
    ("SSE_HEARTBEAT_INTERVAL_SECS", "sse.heartbeat_interval_secs"),
    ("LOG_LEVEL", "log.level"),
];

impl Settings {
    /// Layers defaults, the optional TOML file, `OUTLOOK_MCP__*` variables and
    /// the direct overrides, in that order.
    pub fn new(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let mut config_builder = config::Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", DEFAULT_PORT as i64)?
            .set_default("graph.base_url", DEFAULT_GRAPH_BASE_URL)?
            .set_default(
                "sse.heartbeat_interval_secs",
                DEFAULT_HEARTBEAT_INTERVAL.as_secs() as i64,
            )?
            .set_default("log.level", DEFAULT_LOG_LEVEL)?;

        if let Some(path) = config_path {
            config_builder = config_builder.add_source(File::with_name(path));
        }

        // e.g. `OUTLOOK_MCP__GRAPH__BASE_URL=...` overrides `graph.base_url`
        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .ignore_empty(true),
        );

        for (env_var, key) in DIRECT_OVERRIDES {
            let Ok(value) = env::var(env_var) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match key {
                "port" => match value.parse::<u16>() {
                    Ok(port) => config_builder = config_builder.set_override(key, port as i64)?,
                    Err(_) => warn!("Invalid port value in {}: {}", env_var, value),
                },
                "sse.heartbeat_interval_secs" => match value.parse::<u64>() {
                    Ok(secs) if secs > 0 => {
                        config_builder = config_builder.set_override(key, secs as i64)?
                    }
                    _ => warn!("Invalid heartbeat interval in {}: {}", env_var, value),
                },
                _ => config_builder = config_builder.set_override(key, value)?,
            }
        }

        let settings: Settings = config_builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.sse.heartbeat_interval_secs == 0 {
            return Err(SettingsError::Invalid(
                "sse.heartbeat_interval_secs must be greater than zero".to_string(),
            ));
        }
        url::Url::parse(&self.graph.base_url).map_err(|e| {
            SettingsError::Invalid(format!("graph.base_url '{}': {}", self.graph.base_url, e))
        })?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            graph: GraphConfig {
                base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            },
            sse: SseConfig {
                heartbeat_interval_secs: DEFAULT_HEARTBEAT_INTERVAL.as_secs(),
            },
            log: LogConfig {
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load or parse configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
