// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::pin::Pin;
use std::time::Duration;

use actix_web::{body::MessageBody, http::StatusCode, test, web, App};
use outlook_mcp::api::{configure_routes, rest::cors, sse::HeartbeatConfig};
use serde_json::{json, Value};

use super::support::{dispatcher_for, graph_message};

macro_rules! app {
    ($dispatcher:expr, $interval:expr) => {
        test::init_service(
            App::new()
                .wrap(cors())
                .app_data(web::Data::from($dispatcher))
                .app_data(web::Data::new(HeartbeatConfig { interval: $interval }))
                .configure(configure_routes),
        )
        .await
    };
}

fn rpc(method: &str, params: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/rpc")
        .set_json(json!({ "method": method, "params": params }))
        .to_request()
}

#[actix_web::test]
async fn token_then_list_over_http() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/me/messages")
        .match_header("authorization", "Bearer T1")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(json!({ "value": [graph_message("M1")] }).to_string())
        .create_async()
        .await;
    let app = app!(dispatcher_for(&server, None), Duration::from_secs(30));

    let resp = test::call_service(&app, rpc("list_emails", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, rpc("set_access_token", json!({ "access_token": "T1" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::call_and_read_body_json(&app, rpc("list_emails", json!({ "top": 5 }))).await;
    assert_eq!(body["result"][0]["id"], "M1");
    assert_eq!(body["result"][0]["from"], "Alice <a@x.com>");
}

#[actix_web::test]
async fn delete_without_id_is_rejected_before_graph() {
    let mut server = mockito::Server::new_async().await;
    let delete = server
        .mock("DELETE", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let app = app!(dispatcher_for(&server, Some("T1")), Duration::from_secs(30));

    let resp = test::call_service(&app, rpc("delete_email", json!({}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Message ID is required" }));
    delete.assert_async().await;
}

#[actix_web::test]
async fn upstream_failures_are_server_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/me/messages/M404")
        .with_status(404)
        .create_async()
        .await;
    let app = app!(dispatcher_for(&server, Some("T1")), Duration::from_secs(30));

    let resp = test::call_service(&app, rpc("get_email", json!({ "message_id": "M404" }))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Email with ID M404 not found.");
}

#[actix_web::test]
async fn sse_stream_emits_heartbeats() {
    let server = mockito::Server::new_async().await;
    let app = app!(dispatcher_for(&server, None), Duration::from_millis(25));

    let req = test::TestRequest::get().uri("/sse").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mut body = resp.into_body();
    let mut events = Vec::new();
    while events.len() < 3 {
        let chunk = std::future::poll_fn(|cx| Pin::new(&mut body).poll_next(cx))
            .await
            .expect("stream ended early")
            .unwrap();
        events.push(String::from_utf8(chunk.to_vec()).unwrap());
    }

    assert!(events[0].contains(r#"{"connected":true}"#));
    assert!(events[1].contains(r#""heartbeat":"#));
    assert!(events[2].contains(r#""heartbeat":"#));
}
