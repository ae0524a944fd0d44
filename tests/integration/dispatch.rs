// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use mockito::Matcher;
use outlook_mcp::mcp::{FailureKind, ToolOutput};
use serde_json::json;

use super::support::{dispatcher_for, graph_message};

fn default_list_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("$top".into(), "10".into()),
        Matcher::UrlEncoded("$orderby".into(), "receivedDateTime DESC".into()),
    ])
}

#[tokio::test]
async fn list_without_params_uses_defaults_and_formats_sender() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/me/messages")
        .match_header("authorization", "Bearer T1")
        .match_query(default_list_query())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "value": [graph_message("M1")] }).to_string())
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server, None);

    dispatcher
        .dispatch("set_access_token", json!({ "access_token": "T1" }))
        .await
        .unwrap();
    let payload = dispatcher
        .dispatch("list_emails", json!({}))
        .await
        .unwrap()
        .into_value();

    mock.assert_async().await;
    assert_eq!(
        payload,
        json!([{
            "id": "M1",
            "subject": "Quarterly numbers",
            "from": "Alice <a@x.com>",
            "received": "2024-05-01T10:00:00Z",
            "preview": "Numbers attached",
            "isRead": false,
            "hasAttachments": true,
            "importance": "high"
        }])
    );
}

#[tokio::test]
async fn get_without_body_falls_back_to_preview() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/me/messages/M1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(graph_message("M1").to_string())
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server, Some("T1"));

    let detail = dispatcher
        .dispatch("get_email", json!({ "message_id": "M1" }))
        .await
        .unwrap()
        .into_value();

    assert_eq!(detail["body"], "Numbers attached");
    assert_eq!(detail["bodyType"], "preview");
    assert_eq!(detail["hasAttachments"], true);
}

#[tokio::test]
async fn get_with_html_body_keeps_content_type() {
    let mut server = mockito::Server::new_async().await;
    let mut message = graph_message("M2");
    message["body"] = json!({ "contentType": "html", "content": "<p>Numbers</p>" });
    server
        .mock("GET", "/me/messages/M2")
        .with_status(200)
        .with_body(message.to_string())
        .create_async()
        .await;

    let detail = dispatcher_for(&server, Some("T1"))
        .dispatch("get_email", json!({ "message_id": "M2" }))
        .await
        .unwrap()
        .into_value();

    assert_eq!(detail["body"], "<p>Numbers</p>");
    assert_eq!(detail["bodyType"], "html");
}

#[tokio::test]
async fn search_matches_the_equivalent_list_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/me/messages")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("$top".into(), "4".into()),
            Matcher::UrlEncoded("$orderby".into(), "receivedDateTime DESC".into()),
            Matcher::UrlEncoded("$search".into(), "\"budget\"".into()),
        ]))
        .with_status(200)
        .with_body(json!({ "value": [] }).to_string())
        .expect(2)
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server, Some("T1"));

    let searched = dispatcher
        .dispatch("search_emails", json!({ "query": "budget", "top": 4 }))
        .await
        .unwrap();
    let listed = dispatcher
        .dispatch("list_emails", json!({ "search": "budget", "top": 4 }))
        .await
        .unwrap();

    assert_eq!(searched, listed);
    mock.assert_async().await;
}

#[tokio::test]
async fn mark_and_delete_confirmations() {
    let mut server = mockito::Server::new_async().await;
    let patch = server
        .mock("PATCH", "/me/messages/M1")
        .match_body(Matcher::Json(json!({ "isRead": true })))
        .with_status(200)
        .with_body(graph_message("M1").to_string())
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/me/messages/M1")
        .with_status(204)
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server, Some("T1"));

    let marked = dispatcher
        .dispatch("mark_as_read", json!({ "message_id": "M1" }))
        .await
        .unwrap();
    let deleted = dispatcher
        .dispatch("delete_email", json!({ "message_id": "M1" }))
        .await
        .unwrap();

    assert_eq!(marked, ToolOutput::Text("Email M1 has been marked as read.".into()));
    assert_eq!(deleted, ToolOutput::Text("Email M1 has been deleted.".into()));
    patch.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn without_a_token_nothing_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mut untouched = Vec::new();
    for method in ["GET", "PATCH", "DELETE"] {
        let mock = server
            .mock(method, Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        untouched.push(mock);
    }
    let dispatcher = dispatcher_for(&server, None);

    let calls = [
        ("list_emails", json!({})),
        ("get_email", json!({ "message_id": "M1" })),
        ("search_emails", json!({ "query": "x" })),
        ("mark_as_read", json!({ "message_id": "M1", "is_read": false })),
        ("delete_email", json!({ "message_id": "M1" })),
    ];
    for (name, params) in calls {
        let failure = dispatcher.dispatch(name, params).await.unwrap_err();
        assert_eq!(failure.kind, FailureKind::AuthRequired, "tool {}", name);
        assert!(failure.message.contains("set_access_token"));
    }
    for mock in untouched {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn rejected_token_and_missing_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/me/messages")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("GET", "/me/messages/M404")
        .with_status(404)
        .create_async()
        .await;
    let dispatcher = dispatcher_for(&server, Some("expired"));

    let rejected = dispatcher.dispatch("list_emails", json!({})).await.unwrap_err();
    assert_eq!(rejected.kind, FailureKind::AuthRequired);

    let missing = dispatcher
        .dispatch("get_email", json!({ "message_id": "M404" }))
        .await
        .unwrap_err();
    assert_eq!(missing.kind, FailureKind::NotFound);
    assert!(missing.message.contains("M404"));
}

#[tokio::test]
async fn zero_top_sends_the_default_page_size() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/me/messages")
        .match_query(default_list_query())
        .with_status(200)
        .with_body(json!({ "value": [] }).to_string())
        .expect(1)
        .create_async()
        .await;

    dispatcher_for(&server, Some("T1"))
        .dispatch("list_emails", json!({ "top": 0 }))
        .await
        .unwrap();
    mock.assert_async().await;
}
