// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Caller-facing projections of Graph messages.
//!
//! Rebuilt from the upstream response on every call and never mutated.

use serde::{Deserialize, Serialize};

use crate::outlook::types::{Message, Recipient};

/// `bodyType` reported when Graph returned no full body.
pub const PREVIEW_BODY_TYPE: &str = "preview";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailSummary {
    pub id: String,
    pub subject: Option<String>,
    pub from: Option<String>,
    pub received: Option<String>,
    pub preview: String,
    pub is_read: bool,
    pub has_attachments: bool,
    pub importance: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailDetail {
    pub id: String,
    pub subject: Option<String>,
    pub from: Option<String>,
    pub received: Option<String>,
    pub body: String,
    pub body_type: String,
    pub is_read: bool,
    pub has_attachments: bool,
    pub importance: Option<String>,
}

/// Renders a sender as `Name <address>`.
pub fn format_sender(sender: &Recipient) -> String {
    format!("{} <{}>", sender.email_address.name, sender.email_address.address)
}

impl From<&Message> for EmailSummary {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            subject: message.subject.clone(),
            from: message.from.as_ref().map(format_sender),
            received: message.received_date_time.clone(),
            preview: message.body_preview.clone(),
            is_read: message.is_read,
            has_attachments: message.has_attachments,
            importance: message.importance.clone(),
        }
    }
}

impl From<&Message> for EmailDetail {
    fn from(message: &Message) -> Self {
        let body = message
            .body
            .as_ref()
            .map(|b| b.content.as_str())
            .filter(|content| !content.is_empty())
            .unwrap_or(message.body_preview.as_str());
        let body_type = message
            .body
            .as_ref()
            .map(|b| b.content_type.as_str())
            .filter(|content_type| !content_type.is_empty())
            .unwrap_or(PREVIEW_BODY_TYPE);

        Self {
            id: message.id.clone(),
            subject: message.subject.clone(),
            from: message.from.as_ref().map(format_sender),
            received: message.received_date_time.clone(),
            body: body.to_string(),
            body_type: body_type.to_string(),
            is_read: message.is_read,
            has_attachments: message.has_attachments,
            importance: message.importance.clone(),
        }
    }
}
