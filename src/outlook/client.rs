// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Outbound calls against the Microsoft Graph mail API.
//!
//! Every operation sends exactly one request. Nothing is retried and nothing
//! is cached; the only state read is the current bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header::CONTENT_TYPE, Method, RequestBuilder, Response, StatusCode};
use url::Url;

#[cfg(test)]
use mockall::automock;

use super::credential::{Credential, CredentialHolder};
use super::error::OutlookError;
use super::types::{GraphErrorBody, ListQuery, Message, MessageCollection, ReadFlagUpdate};

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

const LIST_OPERATION: &str = "list emails";
const GET_OPERATION: &str = "get email";
const MARK_OPERATION: &str = "mark email as read";
const DELETE_OPERATION: &str = "delete email";

/// The mail operations the tools are built on.
///
/// Implemented by [`OutlookClient`] against Graph; mocked in dispatch tests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MailApi: Send + Sync {
    async fn list_emails(&self, query: ListQuery) -> Result<Vec<Message>, OutlookError>;

    async fn get_email(&self, message_id: &str) -> Result<Message, OutlookError>;

    /// Free-text search. Defined as a list call with `search` and `top` set and
    /// the default ordering.
    async fn search_emails(&self, query: &str, top: u32) -> Result<Vec<Message>, OutlookError>;

    async fn mark_as_read(&self, message_id: &str, is_read: bool) -> Result<(), OutlookError>;

    async fn delete_email(&self, message_id: &str) -> Result<(), OutlookError>;
}

/// Graph-backed [`MailApi`].
#[derive(Debug, Clone)]
pub struct OutlookClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<CredentialHolder>,
}

impl OutlookClient {
    pub fn new(base_url: &str, credentials: Arc<CredentialHolder>) -> Result<Self, OutlookError> {
        // Reject malformed base URLs up front instead of on the first call.
        Url::parse(base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/me/messages", self.base_url)
    }

    fn message_url(&self, message_id: &str) -> String {
        format!("{}/me/messages/{}", self.base_url, urlencoding::encode(message_id))
    }

    fn authorized(&self, method: Method, url: String, token: &Credential) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(token.expose())
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send(
        request: RequestBuilder,
        operation: &'static str,
        not_found_id: Option<&str>,
    ) -> Result<Response, OutlookError> {
        let response = request
            .send()
            .await
            .map_err(|e| OutlookError::upstream(operation, e.to_string()))?;
        check_status(response, operation, not_found_id).await
    }
}

/// Maps a non-success Graph response onto the error vocabulary.
async fn check_status(
    response: Response,
    operation: &'static str,
    not_found_id: Option<&str>,
) -> Result<Response, OutlookError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        warn!("Graph rejected the access token while trying to {}", operation);
        return Err(OutlookError::InvalidCredential);
    }
    if status == StatusCode::NOT_FOUND {
        if let Some(id) = not_found_id {
            return Err(OutlookError::NotFound { id: id.to_string() });
        }
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GraphErrorBody>(&body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
    warn!("Graph call to {} failed with status {}: {}", operation, status, message);
    Err(OutlookError::upstream(operation, message))
}

#[async_trait]
impl MailApi for OutlookClient {
    async fn list_emails(&self, query: ListQuery) -> Result<Vec<Message>, OutlookError> {
        let token = self.credentials.current()?;
        let pairs = query.to_query_pairs();
        debug!("GET /me/messages with {} query parameters", pairs.len());

        let request = self
            .authorized(Method::GET, self.messages_url(), &token)
            .query(&pairs);
        let response = Self::send(request, LIST_OPERATION, None).await?;
        let collection: MessageCollection = response
            .json()
            .await
            .map_err(|e| OutlookError::upstream(LIST_OPERATION, e.to_string()))?;
        Ok(collection.value)
    }

    async fn get_email(&self, message_id: &str) -> Result<Message, OutlookError> {
        let token = self.credentials.current()?;
        debug!("GET /me/messages/{}", message_id);

        let request = self.authorized(Method::GET, self.message_url(message_id), &token);
        let response = Self::send(request, GET_OPERATION, Some(message_id)).await?;
        response
            .json()
            .await
            .map_err(|e| OutlookError::upstream(GET_OPERATION, e.to_string()))
    }

    async fn search_emails(&self, query: &str, top: u32) -> Result<Vec<Message>, OutlookError> {
        self.list_emails(ListQuery::for_search(query, top)).await
    }

    async fn mark_as_read(&self, message_id: &str, is_read: bool) -> Result<(), OutlookError> {
        let token = self.credentials.current()?;
        debug!("PATCH /me/messages/{} isRead={}", message_id, is_read);

        let request = self
            .authorized(Method::PATCH, self.message_url(message_id), &token)
            .json(&ReadFlagUpdate { is_read });
        Self::send(request, MARK_OPERATION, None).await?;
        Ok(())
    }

    async fn delete_email(&self, message_id: &str) -> Result<(), OutlookError> {
        let token = self.credentials.current()?;
        debug!("DELETE /me/messages/{}", message_id);

        let request = self.authorized(Method::DELETE, self.message_url(message_id), &token);
        Self::send(request, DELETE_OPERATION, None).await?;
        Ok(())
    }
}
