//! Project and iteration tests against a mocked Zanata API.

use std::sync::Arc;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zanata::{Get, IterationStatus, List, Project, ProjectStatus, Session, StaticAuthorizer, ZanataError};

fn session(base: &str) -> Session {
    let authorizer = StaticAuthorizer::new(base).unwrap();
    Session::new(Arc::new(authorizer), "test").unwrap()
}

fn coala_detail() -> serde_json::Value {
    serde_json::json!({
        "id": "coala",
        "name": "coala",
        "description": "Code analysis made easy",
        "status": "ACTIVE",
        "iterations": [
            {"id": "0.9", "status": "READONLY"},
            {"id": "master", "status": "ACTIVE"}
        ]
    })
}

#[tokio::test]
async fn test_list_projects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "coala", "name": "coala", "status": "ACTIVE", "defaultType": "Gettext"},
            {"id": "legacy", "name": "Legacy", "status": "OBSOLETE"},
            {"id": "odd", "name": "Odd", "status": "bogus"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let projects = Project::list(&session(&mock_server.uri()), &(), None)
        .await
        .unwrap();

    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0].id, "coala");
    assert_eq!(projects[1].status, ProjectStatus::Obsolete);
    assert_eq!(projects[2].status, ProjectStatus::Unknown);
    assert!(projects.iter().all(|p| !p.loaded()));
}

#[tokio::test]
async fn test_list_projects_rejects_non_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "x"})))
        .mount(&mock_server)
        .await;

    let err = session(&mock_server.uri())
        .get_projects(None)
        .await
        .unwrap_err();

    assert!(matches!(err, ZanataError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_projects_rejects_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{not json"))
        .mount(&mock_server)
        .await;

    let err = session(&mock_server.uri())
        .get_projects(None)
        .await
        .unwrap_err();

    assert!(matches!(err, ZanataError::ParseError(_)));
}

#[tokio::test]
async fn test_get_project_with_iterations() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects/p/coala"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coala_detail()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = session(&mock_server.uri());
    let project = Project::get(&session, "coala".to_string(), None)
        .await
        .unwrap();

    assert_eq!(project.description.as_deref(), Some("Code analysis made easy"));
    assert!(project.loaded());

    // Loaded projects answer from the cache
    let iterations = project.get_iterations(None).await.unwrap();
    assert_eq!(iterations.len(), 2);
    assert_eq!(iterations[0].id, "0.9");
    assert_eq!(iterations[0].status, IterationStatus::ReadOnly);
    assert_eq!(iterations[1].project_id, "coala");
}

#[tokio::test]
async fn test_get_project_missing_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects/p/coala"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "coala",
            "name": "coala",
            "iterations": []
        })))
        .mount(&mock_server)
        .await;

    let err = session(&mock_server.uri())
        .get_project("coala", None)
        .await
        .unwrap_err();

    match err {
        ZanataError::InvalidResponse(message) => assert!(message.contains("status")),
        other => panic!("Expected InvalidResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_project_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects/p/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Project not found"))
        .mount(&mock_server)
        .await;

    let err = session(&mock_server.uri())
        .get_project("missing", None)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().contains("Project not found"));
}

#[tokio::test]
async fn test_iterations_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "coala", "name": "coala", "status": "ACTIVE"}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/projects/p/coala"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coala_detail()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let projects = session(&mock_server.uri()).get_projects(None).await.unwrap();
    let project = &projects[0];
    assert!(!project.loaded());

    let first = project.get_iterations(None).await.unwrap();
    assert!(project.loaded());
    let second = project.get_iterations(None).await.unwrap();

    assert_eq!(first.len(), 2);
    assert!(Arc::ptr_eq(&first[0], &second[0]));
    // wiremock verifies the single detail request on drop
}

#[tokio::test]
async fn test_concurrent_first_loads_each_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "coala", "name": "coala", "status": "ACTIVE"}
        ])))
        .mount(&mock_server)
        .await;

    // No single-flight: each unloaded caller issues its own request
    Mock::given(method("GET"))
        .and(path("/rest/projects/p/coala"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coala_detail()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let projects = session(&mock_server.uri()).get_projects(None).await.unwrap();
    let project = &projects[0];

    let (a, b) = tokio::join!(project.get_iterations(None), project.get_iterations(None));
    let (a, b) = (a.unwrap(), b.unwrap());

    // The first stored snapshot is what both callers get
    assert!(Arc::ptr_eq(&a[0], &b[0]));
    let cached = project.cached_iterations().unwrap();
    assert!(Arc::ptr_eq(&a[0], &cached[0]));
}

#[tokio::test]
async fn test_failed_iteration_fetch_leaves_project_unloaded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "coala", "name": "coala", "status": "ACTIVE"}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/projects/p/coala"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let projects = session(&mock_server.uri()).get_projects(None).await.unwrap();

    assert!(projects[0].get_iterations(None).await.is_err());
    assert!(!projects[0].loaded());
}

#[tokio::test]
async fn test_download_translated_documentation() {
    let mock_server = MockServer::start().await;
    let document = r#"{"textFlowTargets":[{"resId":"open","content":"Datei öffnen"}]}"#;

    Mock::given(method("GET"))
        .and(path("/rest/projects/p/coala"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coala_detail()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(
            "/rest/projects/p/coala/iterations/i/master/r/coala/translations/de-DE",
        ))
        .and(query_param("ext", "gettext"))
        .respond_with(ResponseTemplate::new(200).set_body_string(document))
        .expect(1)
        .mount(&mock_server)
        .await;

    let project = session(&mock_server.uri())
        .get_project("coala", None)
        .await
        .unwrap();
    let iterations = project.get_iterations(None).await.unwrap();
    let master = iterations.iter().find(|i| i.id == "master").unwrap();

    let body = master
        .get_translated_documentation("coala", "de-DE", None)
        .await
        .unwrap();

    assert!(body.status().is_success());
    assert_eq!(body.text().await.unwrap(), document);
}
