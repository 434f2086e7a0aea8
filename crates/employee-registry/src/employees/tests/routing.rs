use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::employees::router::{create_handler, employee_router};
use crate::employees::service::EmployeeService;
use crate::employees::validation::{INVALID_DOCUMENT_NUMBER, INVALID_SALARY};

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serializable")))
        .expect("request builds")
}

fn scenario_payload() -> Value {
    json!({
        "firstName": "Alex",
        "lastName": "Sanchez",
        "documentType": "CC",
        "documentNumber": "123456789",
        "birthDate": "1997-12-27",
        "jobStartDate": "2021-03-01",
        "title": "Software Engineer",
        "salary": 100.00
    })
}

#[tokio::test]
async fn create_route_returns_registered_employee() {
    let registry = Arc::new(ScriptedRegistry::returning(registry_success("", "")));
    let router = employee_router(Arc::new(EmployeeService::with_clock(registry, today)));

    let response = router
        .oneshot(post_json("/api/v1/employees", &scenario_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "");
    assert_eq!(body["errorMessage"], "");
    assert_eq!(body["employeeData"]["salary"], 100.0);
    assert_eq!(body["employeeData"]["birthDate"], "1997-12-27");
    assert_eq!(
        body["employeeData"]["tenureSinceStart"],
        "3 years, 3 months, 14 days"
    );
}

#[tokio::test]
async fn legacy_route_accepts_cargo_field() {
    let registry = Arc::new(ScriptedRegistry::returning(registry_success("", "")));
    let router = employee_router(Arc::new(EmployeeService::with_clock(
        registry.clone(),
        today,
    )));

    let mut payload = scenario_payload();
    let fields = payload.as_object_mut().expect("object payload");
    fields.remove("title");
    fields.insert("cargo".to_string(), json!("Software Engineer"));

    let response = router
        .oneshot(post_json("/api", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        registry.calls()[0].request.title.as_deref(),
        Some("Software Engineer")
    );
}

#[tokio::test]
async fn validation_failure_is_reported_in_body() {
    let registry = Arc::new(ScriptedRegistry::returning(registry_success("", "")));
    let router = employee_router(Arc::new(EmployeeService::with_clock(
        registry.clone(),
        today,
    )));

    let mut payload = scenario_payload();
    payload["documentNumber"] = json!("");

    let response = router
        .oneshot(post_json("/api/v1/employees", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Error");
    assert_eq!(body["errorMessage"], INVALID_DOCUMENT_NUMBER);
    assert!(body.get("employeeData").is_none());
    assert!(registry.calls().is_empty());
}

#[tokio::test]
async fn null_salary_fails_the_salary_rule() {
    let registry = Arc::new(ScriptedRegistry::returning(registry_success("", "")));
    let router = employee_router(Arc::new(EmployeeService::with_clock(
        registry.clone(),
        today,
    )));

    let mut payload = scenario_payload();
    payload["salary"] = Value::Null;

    let response = router
        .oneshot(post_json("/api/v1/employees", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Error");
    assert_eq!(body["errorMessage"], INVALID_SALARY);
    assert!(registry.calls().is_empty());
}

#[tokio::test]
async fn business_failure_is_reported_in_body() {
    let registry = Arc::new(ScriptedRegistry::returning(registry_refusal(
        "Error",
        "The employee already exists",
    )));
    let service = Arc::new(EmployeeService::with_clock(registry, today));

    let response = create_handler(State(service), axum::Json(employee_request())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Error");
    assert_eq!(body["errorMessage"], "The employee already exists");
    assert!(body.get("employeeData").is_none());
}

#[tokio::test]
async fn panicking_registry_is_answered_like_any_fault() {
    let service = Arc::new(EmployeeService::with_clock(
        Arc::new(PanickingRegistry),
        today,
    ));

    let response = create_handler(State(service), axum::Json(employee_request())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Error");
    assert_eq!(body["errorMessage"], "Message");
    assert!(body.get("employeeData").is_none());
}

#[tokio::test]
async fn malformed_dates_are_rejected_before_the_pipeline() {
    let registry = Arc::new(ScriptedRegistry::returning(registry_success("", "")));
    let router = employee_router(Arc::new(EmployeeService::with_clock(
        registry.clone(),
        today,
    )));

    let mut payload = scenario_payload();
    payload["birthDate"] = json!("27-12-1997");

    let response = router
        .oneshot(post_json("/api/v1/employees", &payload))
        .await
        .expect("router responds");

    assert!(response.status().is_client_error());
    assert!(registry.calls().is_empty());
}
