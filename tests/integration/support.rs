// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::Arc;

use outlook_mcp::mcp::Dispatcher;
use serde_json::{json, Value};

/// Dispatcher talking to `server`, optionally with a token already stored.
pub fn dispatcher_for(server: &mockito::ServerGuard, token: Option<&str>) -> Arc<Dispatcher> {
    let dispatcher = Dispatcher::for_graph(&server.url()).expect("mock server url is valid");
    if let Some(token) = token {
        dispatcher.credentials().set(token);
    }
    Arc::new(dispatcher)
}

/// A Graph message resource without a `body`.
pub fn graph_message(id: &str) -> Value {
    json!({
        "id": id,
        "subject": "Quarterly numbers",
        "from": { "emailAddress": { "name": "Alice", "address": "a@x.com" } },
        "receivedDateTime": "2024-05-01T10:00:00Z",
        "bodyPreview": "Numbers attached",
        "hasAttachments": true,
        "isRead": false,
        "importance": "high"
    })
}
