// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// src/mcp/tools.rs
// Static catalog of the mail tools. The dispatcher validates and fills
// defaults from this table, and `tools/list` renders it as JSON schema.

use serde_json::{json, Map, Value};

use crate::outlook::types::{DEFAULT_ORDER_BY, DEFAULT_TOP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    SetAccessToken,
    ListEmails,
    GetEmail,
    SearchEmails,
    MarkAsRead,
    DeleteEmail,
}

impl ToolName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::SetAccessToken => "set_access_token",
            ToolName::ListEmails => "list_emails",
            ToolName::GetEmail => "get_email",
            ToolName::SearchEmails => "search_emails",
            ToolName::MarkAsRead => "mark_as_read",
            ToolName::DeleteEmail => "delete_email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Boolean,
}

impl ParamType {
    pub fn json_type(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDefault {
    Number(u32),
    Text(&'static str),
    Flag(bool),
}

impl ParamDefault {
    pub fn to_value(&self) -> Value {
        match self {
            ParamDefault::Number(n) => json!(n),
            ParamDefault::Text(s) => json!(s),
            ParamDefault::Flag(b) => json!(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    /// Must be present and non-empty; `missing_message` is reported otherwise.
    Required { missing_message: &'static str },
    Optional { default: Option<ParamDefault> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamType,
    pub description: &'static str,
    pub requirement: Requirement,
}

impl ParamSpec {
    pub fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required { .. })
    }

    pub fn default_value(&self) -> Option<ParamDefault> {
        match self.requirement {
            Requirement::Optional { default } => default,
            Requirement::Required { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSpec {
    pub tool: ToolName,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
}

const ACCESS_TOKEN_REQUIRED: &str = "Access token is required";
const MESSAGE_ID_REQUIRED: &str = "Message ID is required";
const QUERY_REQUIRED: &str = "Search query is required";

const fn message_id(description: &'static str) -> ParamSpec {
    ParamSpec {
        name: "message_id",
        kind: ParamType::String,
        description,
        requirement: Requirement::Required { missing_message: MESSAGE_ID_REQUIRED },
    }
}

pub static TOOLS: [ToolSpec; 6] = [
    ToolSpec {
        tool: ToolName::SetAccessToken,
        description: "Set the Microsoft Graph API access token for Outlook access",
        params: &[ParamSpec {
            name: "access_token",
            kind: ParamType::String,
            description: "Microsoft Graph API access token",
            requirement: Requirement::Required { missing_message: ACCESS_TOKEN_REQUIRED },
        }],
    },
    ToolSpec {
        tool: ToolName::ListEmails,
        description: "List emails from Outlook inbox",
        params: &[
            ParamSpec {
                name: "top",
                kind: ParamType::Number,
                description: "Number of emails to retrieve (default: 10)",
                requirement: Requirement::Optional { default: Some(ParamDefault::Number(DEFAULT_TOP)) },
            },
            ParamSpec {
                name: "skip",
                kind: ParamType::Number,
                description: "Number of emails to skip (for pagination)",
                requirement: Requirement::Optional { default: None },
            },
            ParamSpec {
                name: "filter",
                kind: ParamType::String,
                description: "OData filter query (e.g., \"isRead eq false\")",
                requirement: Requirement::Optional { default: None },
            },
            ParamSpec {
                name: "orderBy",
                kind: ParamType::String,
                description: "Order by field (e.g., \"receivedDateTime DESC\")",
                requirement: Requirement::Optional { default: Some(ParamDefault::Text(DEFAULT_ORDER_BY)) },
            },
            ParamSpec {
                name: "search",
                kind: ParamType::String,
                description: "Search query to find emails",
                requirement: Requirement::Optional { default: None },
            },
            ParamSpec {
                name: "select",
                kind: ParamType::String,
                description: "Comma-separated message properties to return (e.g., \"subject,from,receivedDateTime\")",
                requirement: Requirement::Optional { default: None },
            },
        ],
    },
    ToolSpec {
        tool: ToolName::GetEmail,
        description: "Get detailed information about a specific email",
        params: &[message_id("The ID of the email message")],
    },
    ToolSpec {
        tool: ToolName::SearchEmails,
        description: "Search for emails using a search query",
        params: &[
            ParamSpec {
                name: "query",
                kind: ParamType::String,
                description: "Search query to find emails",
                requirement: Requirement::Required { missing_message: QUERY_REQUIRED },
            },
            ParamSpec {
                name: "top",
                kind: ParamType::Number,
                description: "Maximum number of results to return (default: 10)",
                requirement: Requirement::Optional { default: Some(ParamDefault::Number(DEFAULT_TOP)) },
            },
        ],
    },
    ToolSpec {
        tool: ToolName::MarkAsRead,
        description: "Mark an email as read or unread",
        params: &[
            message_id("The ID of the email message"),
            ParamSpec {
                name: "is_read",
                kind: ParamType::Boolean,
                description: "Mark as read (true) or unread (false)",
                requirement: Requirement::Optional { default: Some(ParamDefault::Flag(true)) },
            },
        ],
    },
    ToolSpec {
        tool: ToolName::DeleteEmail,
        description: "Delete an email",
        params: &[message_id("The ID of the email message to delete")],
    },
];

/// Looks a tool up by its wire name.
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|spec| spec.tool.as_str() == name)
}

impl ToolSpec {
    pub fn name(&self) -> &'static str {
        self.tool.as_str()
    }

    /// JSON-schema object describing the tool's arguments.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in self.params {
            let mut property = json!({
                "type": param.kind.json_type(),
                "description": param.description,
            });
            if let Some(default) = param.default_value() {
                property["default"] = default.to_value();
            }
            properties.insert(param.name.to_string(), property);
        }

        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name)
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }

    /// Entry as it appears in a `tools/list` result.
    pub fn to_listing(&self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

/// Full catalog in `tools/list` format.
pub fn tool_listing() -> Vec<Value> {
    TOOLS.iter().map(ToolSpec::to_listing).collect()
}
