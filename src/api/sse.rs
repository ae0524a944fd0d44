// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! `GET /sse` heartbeat push channel.
//!
//! Each connection gets its own channel and heartbeat task. The task sends a
//! connected acknowledgement, then a timestamped heartbeat every interval, and
//! stops as soon as the response stream (the receiver) is dropped.

use std::convert::Infallible;
use std::time::Duration;

use actix_web::web;
use actix_web_lab::sse::{self, Sse};
use chrono::{SecondsFormat, Utc};
use futures_util::{Stream, StreamExt as _};
use log::{debug, info};
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant};
use tokio_stream::wrappers::ReceiverStream;
use uuid::Uuid;

pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct HeartbeatConfig {
    pub interval: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }
}

fn data_event(payload: serde_json::Value) -> sse::Event {
    sse::Event::Data(sse::Data::new(payload.to_string()))
}

/// Feeds one client until its receiver goes away.
pub async fn heartbeat_task(client_id: Uuid, tx: mpsc::Sender<sse::Event>, period: Duration) {
    if tx.send(data_event(json!({ "connected": true }))).await.is_err() {
        debug!("SSE client {} left before the connected event", client_id);
        return;
    }

    let mut ticker = interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
                if tx.send(data_event(json!({ "heartbeat": now }))).await.is_err() {
                    break;
                }
            }
            _ = tx.closed() => break,
        }
    }
    info!("SSE client {} disconnected, heartbeat stopped", client_id);
}

pub async fn sse_handler(
    config: web::Data<HeartbeatConfig>,
) -> Sse<impl Stream<Item = Result<sse::Event, Infallible>>> {
    let client_id = Uuid::new_v4();
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    info!("SSE client {} connected", client_id);

    tokio::spawn(heartbeat_task(client_id, tx, config.interval));

    Sse::from_stream(ReceiverStream::new(rx).map(Ok::<_, Infallible>))
}
