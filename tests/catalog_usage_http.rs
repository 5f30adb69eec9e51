//! Tool catalog administration and usage logging.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

fn keys(tools: &Value) -> Vec<String> {
    tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["key"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn seeded_catalog_is_public_and_ordered() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/public/tools/active", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let tools = response.body.as_array().unwrap();
    assert!(!tools.is_empty());
    assert_eq!(tools[0]["key"], "password-generator");
    let orders: Vec<i64> = tools
        .iter()
        .map(|t| t["displayOrder"].as_i64().unwrap())
        .collect();
    assert!(orders.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn admin_creates_tool_at_end_with_aliases() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let before = app.get("/api/v1/public/tools/active", None).await;
    let count = before.body.as_array().unwrap().len();

    let created = app
        .post(
            "/api/v1/admin/tools",
            Some(&admin),
            json!({ "key": "cron-parser", "name": "Cron Parser", "path": "/dashboard/tools/cron" }),
        )
        .await;

    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["title"], "Cron Parser");
    assert_eq!(created.body["href"], "/dashboard/tools/cron");

    let after = app.get("/api/v1/public/tools/active", None).await;
    let tools = after.body.as_array().unwrap();
    assert_eq!(tools.len(), count + 1);
    assert_eq!(tools.last().unwrap()["key"], "cron-parser");
}

#[tokio::test]
async fn duplicate_tool_key_conflicts() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let response = app
        .post(
            "/api/v1/admin/tools",
            Some(&admin),
            json!({ "key": "dns-lookup", "title": "Again" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["code"], "TOOL_KEY_TAKEN");
}

#[tokio::test]
async fn disabled_tools_leave_the_public_list() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let tools = app.get("/api/v1/public/tools/active", None).await;
    let first = tools.body[0].clone();
    let id = first["id"].as_i64().unwrap();

    let response = app
        .call(
            Method::PATCH,
            &format!("/api/v1/admin/tools/{}/status", id),
            Some(&admin),
            Some(json!({ "enabled": false })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["active"], false);

    let after = app.get("/api/v1/public/tools/active", None).await;
    assert!(!keys(&after.body).contains(&first["key"].as_str().unwrap().to_string()));
}

#[tokio::test]
async fn reorder_assigns_positions_by_index() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let tools = app.get("/api/v1/public/tools/active", None).await;
    let mut ids: Vec<i64> = tools
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    ids.reverse();

    let response = app
        .post("/api/v1/admin/tools/reorder", Some(&admin), json!({ "toolIds": ids }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.get("/api/v1/public/tools/active", None).await;
    let reordered: Vec<i64> = after
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(reordered, ids);
}

#[tokio::test]
async fn update_and_delete_tool() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let created = app
        .post(
            "/api/v1/admin/tools",
            Some(&admin),
            json!({ "key": "color-picker", "title": "Colors" }),
        )
        .await;
    let uri = format!("/api/v1/admin/tools/{}", created.body["id"]);

    let updated = app
        .call(
            Method::PUT,
            &uri,
            Some(&admin),
            Some(json!({ "description": "Pick colors", "keywords": ["hex", "rgb"] })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "Colors");
    assert_eq!(updated.body["keywords"], json!(["hex", "rgb"]));

    let deleted = app.call(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app.get(&uri, Some(&admin)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Usage
// =============================================================================

#[tokio::test]
async fn usage_is_counted_per_caller_and_listed_for_admins() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let carol = app.user_token("carol").await;

    for tool in ["hash-generator", "uuid-generator"] {
        let response = app
            .send(
                Request::post("/api/v1/logs")
                    .header(header::AUTHORIZATION, format!("Bearer {}", carol))
                    .header(header::CONTENT_TYPE, "application/json")
                    .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
                    .body(Body::from(json!({ "toolName": tool }).to_string()))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, Value::Null);
    }

    let today = app.get("/api/v1/users/me/usage/today", Some(&carol)).await;
    assert_eq!(today.body, json!(2));

    let admin_today = app.get("/api/v1/users/me/usage/today", Some(&admin)).await;
    assert_eq!(admin_today.body, json!(0));

    let me = app.get("/api/v1/users/me", Some(&carol)).await;
    let logs = app
        .get(
            &format!("/api/v1/admin/logs?userId={}", me.body["id"].as_str().unwrap()),
            Some(&admin),
        )
        .await;
    assert_eq!(logs.status, StatusCode::OK);
    assert_eq!(logs.body["totalElements"], 2);
    let entries = logs.body["content"].as_array().unwrap();
    let mut names: Vec<&str> = entries
        .iter()
        .map(|e| e["toolName"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["hash-generator", "uuid-generator"]);
    assert!(entries.iter().all(|e| e["ipAddress"] == "203.0.113.7"));
}

#[tokio::test]
async fn usage_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/v1/logs", None, json!({ "toolName": "hash-generator" }))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blank_tool_name_is_rejected() {
    let app = TestApp::new().await;
    let carol = app.user_token("carol").await;

    let response = app
        .post("/api/v1/logs", Some(&carol), json!({ "toolName": "  " }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
