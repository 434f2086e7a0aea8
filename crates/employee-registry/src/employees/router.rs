use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tokio::task::JoinError;
use tracing::{error, info};

use super::domain::EmployeeRequest;
use super::mapping::unexpected_response;
use super::registry::EmployeeRegistry;
use super::service::{panic_message, EmployeeService};
use super::validation::ERROR_STATUS;

/// Router builder exposing the registration endpoint.
pub fn employee_router<R>(service: Arc<EmployeeService<R>>) -> Router
where
    R: EmployeeRegistry + 'static,
{
    Router::new()
        .route("/api/v1/employees", post(create_handler::<R>))
        .route("/api", post(create_handler::<R>))
        .with_state(service)
}

/// Every pipeline outcome is answered with `200 OK`; the body tells them apart. Only a task
/// that never finished, such as one cancelled on shutdown, gets a `500`.
pub(crate) async fn create_handler<R>(
    State(service): State<Arc<EmployeeService<R>>>,
    axum::Json(request): axum::Json<EmployeeRequest>,
) -> Response
where
    R: EmployeeRegistry + 'static,
{
    match tokio::task::spawn_blocking(move || service.register(&request)).await {
        Ok(registration) => {
            info!(outcome = registration.outcome.label(), "registration finished");
            (StatusCode::OK, axum::Json(registration.response)).into_response()
        }
        Err(err) => {
            let message = join_failure_message(err);
            error!(error = %message, "registration task aborted");
            let body = unexpected_response(ERROR_STATUS, message);
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}

fn join_failure_message(err: JoinError) -> String {
    match err.try_into_panic() {
        Ok(payload) => panic_message(payload.as_ref()),
        Err(err) => err.to_string(),
    }
}
