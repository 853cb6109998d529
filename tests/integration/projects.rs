use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use config_admin::config::AppConfig;

use crate::common::{RecordingPersistence, TestApp};

#[tokio::test]
async fn health_check_is_ok() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn list_projects_empty() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/project").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn create_project_attaches_envs_and_new_labels() {
    let app = TestApp::new().await;
    let dev = app.create_env("dev").await;
    let prod = app.create_env("prod").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/project",
            Some(json!({
                "name": "order-service",
                "envs": [{ "id": dev }, { "id": prod }],
                "labels": [{ "name": "master" }, { "id": 99, "name": "ignored" }]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"], "create Project success");

    let (_, list) = app.get("/project").await;
    let project = &list["data"][0];
    assert_eq!(project["name"], "order-service");
    assert_eq!(project["envs"].as_array().unwrap().len(), 2);
    assert_eq!(project["envs"][1]["name"], "prod");
    assert_eq!(project["labels"].as_array().unwrap().len(), 1);
    assert_eq!(project["labels"][0]["name"], "master");
}

#[tokio::test]
async fn create_project_with_unknown_env_is_rolled_back() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/project",
            Some(json!({ "name": "orphan", "envs": [{ "id": 42 }], "labels": [{ "name": "master" }] })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Env [42] not exist");
    assert_eq!(app.count("SELECT COUNT(*) FROM projects").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM labels").await, 0);
}

#[tokio::test]
async fn create_project_requires_name() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::POST, "/project", Some(json!({ "name": "  " })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_project_with_blank_label_is_rolled_back() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/project",
            Some(json!({ "name": "billing", "labels": [{ "name": "master" }, { "name": " " }] })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Label name is required");
    assert_eq!(app.count("SELECT COUNT(*) FROM projects").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM labels").await, 0);
}

#[tokio::test]
async fn malformed_body_uses_failure_envelope() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::POST, "/project", Some(json!({ "envs": [] })))
        .await;

    assert!(status.is_client_error());
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn project_detail() {
    let app = TestApp::new().await;
    let dev = app.create_env("dev").await;
    let id = app.create_project("billing", &[dev], &["master", "v2"]).await;

    let detail = app.project_detail(id).await;

    assert_eq!(detail["id"], id);
    assert_eq!(detail["name"], "billing");
    assert_eq!(detail["envs"][0]["name"], "dev");
    assert_eq!(detail["labels"][1]["name"], "v2");
    assert_eq!(detail["labels"][1]["projectId"], id);
}

#[tokio::test]
async fn project_detail_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/project/detail?id=5").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project [5] not exist");
}

#[tokio::test]
async fn project_detail_requires_id() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/project/detail").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn update_project_changes_only_name() {
    let app = TestApp::new().await;
    let dev = app.create_env("dev").await;
    let prod = app.create_env("prod").await;
    let id = app.create_project("billing", &[dev], &["master"]).await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/project",
            Some(json!({
                "id": id,
                "name": "billing-v2",
                "envs": [{ "id": prod }],
                "labels": [{ "name": "extra" }]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "update Project success");

    let detail = app.project_detail(id).await;
    assert_eq!(detail["name"], "billing-v2");
    assert_eq!(detail["envs"].as_array().unwrap().len(), 1);
    assert_eq!(detail["envs"][0]["name"], "dev");
    assert_eq!(detail["labels"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_project_requires_name() {
    let app = TestApp::new().await;
    let id = app.create_project("billing", &[], &[]).await;

    let (status, body) = app
        .send(Method::PUT, "/project", Some(json!({ "id": id, "name": "  " })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Project name is required");
    assert_eq!(app.project_detail(id).await["name"], "billing");
}

#[tokio::test]
async fn renamed_project_keeps_and_deletes_its_properties() {
    let app = TestApp::new().await;
    let dev = app.create_env("dev").await;
    let id = app.create_project("billing", &[dev], &["master"]).await;
    let label = app.project_detail(id).await["labels"][0]["id"].as_i64().unwrap();
    app.save_properties(id, dev, label, &[("k", "v")]).await;

    let (status, _) = app
        .send(Method::PUT, "/project", Some(json!({ "id": id, "name": "renamed" })))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .get(&format!("/property?projectId={}&envId={}&labelId={}", id, dev, label))
        .await;
    assert_eq!(body["data"], json!([{ "key": "k", "value": "v" }]));

    let (status, _) = app.send(Method::DELETE, &format!("/project?id={}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.count("SELECT COUNT(*) FROM properties").await, 0);
}

#[tokio::test]
async fn same_named_projects_keep_separate_properties() {
    let app = TestApp::new().await;
    let dev = app.create_env("dev").await;
    let first = app.create_project("billing", &[dev], &["master"]).await;
    let second = app.create_project("billing", &[dev], &["master"]).await;
    assert_ne!(first, second);
    let first_label = app.project_detail(first).await["labels"][0]["id"].as_i64().unwrap();
    let second_label = app.project_detail(second).await["labels"][0]["id"].as_i64().unwrap();
    app.save_properties(first, dev, first_label, &[("secret", "A")]).await;

    let (_, body) = app
        .get(&format!(
            "/property?projectId={}&envId={}&labelId={}",
            second, dev, second_label
        ))
        .await;
    assert_eq!(body["data"], json!([]));

    let (status, _) = app
        .send(Method::DELETE, &format!("/project?id={}", second), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .get(&format!(
            "/property?projectId={}&envId={}&labelId={}",
            first, dev, first_label
        ))
        .await;
    assert_eq!(body["data"], json!([{ "key": "secret", "value": "A" }]));
}

#[tokio::test]
async fn update_missing_project_fails() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Method::PUT, "/project", Some(json!({ "id": 3, "name": "ghost" })))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project [3] not exist");
}

#[tokio::test]
async fn delete_project_cascades() {
    let app = TestApp::new().await;
    let dev = app.create_env("dev").await;
    let id = app.create_project("billing", &[dev], &["master"]).await;
    let label_id = app.project_detail(id).await["labels"][0]["id"].as_i64().unwrap();
    app.save_properties(id, dev, label_id, &[("db.url", "jdbc:x"), ("pool", "5")]).await;

    let (status, body) = app.send(Method::DELETE, &format!("/project?id={}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "delete Project success");
    assert_eq!(app.count("SELECT COUNT(*) FROM projects").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM labels").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM project_envs").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM properties").await, 0);
    assert_eq!(app.count("SELECT COUNT(*) FROM envs").await, 1);
}

#[tokio::test]
async fn delete_missing_project_fails() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::DELETE, "/project?id=8", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Project [8] not exist");
}

#[tokio::test]
async fn delete_project_removes_properties_before_entity() {
    let persistence = Arc::new(RecordingPersistence::default());
    let app = TestApp::with_persistence(persistence.clone()).await;
    let id = app.create_project("billing", &[], &[]).await;

    let (status, _) = app.send(Method::DELETE, &format!("/project?id={}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(persistence.calls(), vec!["projects:billing:present"]);
}

#[tokio::test]
async fn failed_property_cleanup_keeps_project() {
    let persistence = Arc::new(RecordingPersistence::failing());
    let app = TestApp::with_persistence(persistence.clone()).await;
    let id = app.create_project("billing", &[], &["master"]).await;

    let (status, body) = app.send(Method::DELETE, &format!("/project?id={}", id), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(persistence.calls().len(), 1);
    assert_eq!(app.count("SELECT COUNT(*) FROM projects").await, 1);
    assert_eq!(app.count("SELECT COUNT(*) FROM labels").await, 1);
}

#[tokio::test]
async fn context_path_prefixes_management_endpoints() {
    let mut config = AppConfig::default();
    config.server.context_path = "/admin/".to_string();
    let app = TestApp::with_config(config).await;

    let (status, _) = app.get("/admin/project").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/project").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}
