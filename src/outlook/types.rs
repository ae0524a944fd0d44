// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP: u32 = 10;
pub const DEFAULT_ORDER_BY: &str = "receivedDateTime DESC";

/// A Graph `message` resource, as much of it as the tools project.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub id: String,
    pub subject: Option<String>,
    pub from: Option<Recipient>,
    pub received_date_time: Option<String>,
    pub body_preview: String,
    pub body: Option<ItemBody>,
    pub has_attachments: bool,
    pub is_read: bool,
    pub importance: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipient {
    pub email_address: EmailAddress,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EmailAddress {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemBody {
    pub content_type: String,
    pub content: String,
}

/// Response of `GET /me/messages`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageCollection {
    pub value: Vec<Message>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// Graph error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GraphErrorBody {
    pub error: GraphErrorDetail,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GraphErrorDetail {
    pub code: String,
    pub message: String,
}

/// Body of the read-flag `PATCH`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFlagUpdate {
    pub is_read: bool,
}

/// Paging and filtering options for listing messages.
///
/// `filter` and `search` are handed to Graph verbatim; their grammar is not
/// checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub filter: Option<String>,
    pub order_by: Option<String>,
    pub select: Option<String>,
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            top: Some(DEFAULT_TOP),
            skip: None,
            filter: None,
            order_by: Some(DEFAULT_ORDER_BY.to_string()),
            select: None,
            search: None,
        }
    }
}

impl ListQuery {
    /// The query a free-text search is defined as.
    pub fn for_search(query: impl Into<String>, top: u32) -> Self {
        Self {
            top: Some(top),
            search: Some(query.into()),
            ..Self::default()
        }
    }

    /// OData query parameters in `$top, $skip, $filter, $orderby, $select,
    /// $search` order. Zero or empty values are left out.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(top) = self.top.filter(|t| *t > 0) {
            pairs.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip.filter(|s| *s > 0) {
            pairs.push(("$skip", skip.to_string()));
        }
        if let Some(filter) = non_empty(&self.filter) {
            pairs.push(("$filter", filter.to_string()));
        }
        if let Some(order_by) = non_empty(&self.order_by) {
            pairs.push(("$orderby", order_by.to_string()));
        }
        if let Some(select) = non_empty(&self.select) {
            pairs.push(("$select", select.to_string()));
        }
        if let Some(search) = non_empty(&self.search) {
            pairs.push(("$search", format!("\"{}\"", search)));
        }
        pairs
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
