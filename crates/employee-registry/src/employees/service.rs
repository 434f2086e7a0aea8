use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{error, info, warn};

use super::domain::{EmployeeRequest, EmployeeResponse};
use super::mapping::{
    failed_response, successful_response, to_registry_request, unexpected_response,
};
use super::registry::EmployeeRegistry;
use super::validation::{validate_on, ValidationOutcome, ERROR_STATUS};

/// Terminal state reached by one registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// A validation rule failed; the registry was never called.
    Rejected,
    Succeeded,
    /// The registry answered without an employee payload.
    BusinessFailure,
    /// The registry call faulted or its payload could not be mapped back.
    UnexpectedFailure,
}

impl RegistrationOutcome {
    pub fn label(self) -> &'static str {
        match self {
            RegistrationOutcome::Rejected => "rejected",
            RegistrationOutcome::Succeeded => "succeeded",
            RegistrationOutcome::BusinessFailure => "business_failure",
            RegistrationOutcome::UnexpectedFailure => "unexpected_failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub outcome: RegistrationOutcome,
    pub response: EmployeeResponse,
}

/// Runs validation, registry mapping and outcome translation for each request.
///
/// Holds no per-request state; one instance can serve any number of callers.
pub struct EmployeeService<R> {
    registry: Arc<R>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<R> EmployeeService<R>
where
    R: EmployeeRegistry + 'static,
{
    pub fn new(registry: Arc<R>) -> Self {
        Self::with_clock(registry, local_today)
    }

    /// Pin the date the job-start rule compares against.
    pub fn with_clock(registry: Arc<R>, today: fn() -> NaiveDate) -> Self {
        Self { registry, today }
    }

    /// Register an employee and return the caller-facing response.
    pub fn create_employee(&self, request: &EmployeeRequest) -> EmployeeResponse {
        self.register(request).response
    }

    pub fn register(&self, request: &EmployeeRequest) -> Registration {
        info!(
            document_type = request.document_type.as_deref().unwrap_or_default(),
            document_number = request.document_number.as_deref().unwrap_or_default(),
            "creating employee"
        );

        match validate_on(request, (self.today)()) {
            ValidationOutcome::Invalid { status, message } => {
                error!(reason = message, "employee request failed validation");
                Registration {
                    outcome: RegistrationOutcome::Rejected,
                    response: failed_response(status, message),
                }
            }
            ValidationOutcome::Valid => self.call_registry(request),
        }
    }

    fn call_registry(&self, request: &EmployeeRequest) -> Registration {
        let registry_request = to_registry_request(request);

        let call = catch_unwind(AssertUnwindSafe(|| {
            self.registry.create_employee(&registry_request)
        }));
        let result = match call {
            Ok(result) => result,
            Err(payload) => return unexpected(panic_message(payload.as_ref())),
        };

        match result {
            Ok(response) if response.response.is_none() => {
                info!(
                    status = %response.status,
                    reason = %response.error_response_message,
                    "registry declined employee"
                );
                Registration {
                    outcome: RegistrationOutcome::BusinessFailure,
                    response: failed_response(response.status, response.error_response_message),
                }
            }
            Ok(response) => {
                info!(status = %response.status, "registry confirmed employee");
                match successful_response(response) {
                    Ok(response) => Registration {
                        outcome: RegistrationOutcome::Succeeded,
                        response,
                    },
                    Err(err) => unexpected(err.to_string()),
                }
            }
            Err(err) => unexpected(err.to_string()),
        }
    }
}

/// Text carried by a panic payload, when it is a string.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "registry call panicked".to_string())
}

fn unexpected(message: String) -> Registration {
    warn!(error = %message, "error calling employee registry");
    Registration {
        outcome: RegistrationOutcome::UnexpectedFailure,
        response: unexpected_response(ERROR_STATUS, message),
    }
}
