use std::str::FromStr;
use std::sync::Mutex;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::employees::domain::EmployeeRequest;
use crate::employees::registry::{
    CreateEmployeeRequest, CreateEmployeeResponse, EmployeeRegistry, RegistryDate,
    RegistryEmployee, RegistryError,
};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2024, 6, 15)
}

pub(super) fn employee_request() -> EmployeeRequest {
    EmployeeRequest {
        first_name: Some("Alex".to_string()),
        last_name: Some("Sanchez".to_string()),
        document_type: Some("CC".to_string()),
        document_number: Some("123456789".to_string()),
        birth_date: Some(date(1997, 12, 27)),
        job_start_date: Some(date(2021, 3, 1)),
        title: Some("Software Engineer".to_string()),
        salary: 100.00,
    }
}

/// The standard request with a blank document number.
pub(super) fn invalid_employee_request() -> EmployeeRequest {
    EmployeeRequest {
        document_number: Some(String::new()),
        ..employee_request()
    }
}

pub(super) fn registry_employee() -> RegistryEmployee {
    RegistryEmployee {
        first_name: "Alex".to_string(),
        last_name: "Sanchez".to_string(),
        document_type: "CC".to_string(),
        document_number: "123456789".to_string(),
        birth_date: RegistryDate::from_naive(date(1997, 12, 27)).expect("representable"),
        job_start_date: RegistryDate::from_naive(date(2021, 3, 1)).expect("representable"),
        age: "26 years".to_string(),
        tenure_since_start: "3 years, 3 months, 14 days".to_string(),
        title: "Software Engineer".to_string(),
        salary: Decimal::from_str("100.00").expect("decimal literal"),
    }
}

pub(super) fn registry_success(status: &str, message: &str) -> CreateEmployeeResponse {
    CreateEmployeeResponse {
        status: status.to_string(),
        error_response_message: message.to_string(),
        response: Some(registry_employee()),
    }
}

pub(super) fn registry_refusal(status: &str, message: &str) -> CreateEmployeeResponse {
    CreateEmployeeResponse {
        status: status.to_string(),
        error_response_message: message.to_string(),
        response: None,
    }
}

/// Registry double answering with a canned reply and recording every request it sees.
pub(super) struct ScriptedRegistry {
    reply: Box<dyn Fn() -> Result<CreateEmployeeResponse, RegistryError> + Send + Sync>,
    calls: Mutex<Vec<CreateEmployeeRequest>>,
}

impl ScriptedRegistry {
    pub(super) fn returning(response: CreateEmployeeResponse) -> Self {
        Self::with(move || Ok(response.clone()))
    }

    pub(super) fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::with(move || Err(RegistryError::Transport(message.clone())))
    }

    pub(super) fn with(
        reply: impl Fn() -> Result<CreateEmployeeResponse, RegistryError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Box::new(reply),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<CreateEmployeeRequest> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

impl EmployeeRegistry for ScriptedRegistry {
    fn create_employee(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<CreateEmployeeResponse, RegistryError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(request.clone());
        (self.reply)()
    }
}

/// Registry whose call dies with a panic, as an unchecked fault would.
pub(super) struct PanickingRegistry;

impl EmployeeRegistry for PanickingRegistry {
    fn create_employee(
        &self,
        _request: &CreateEmployeeRequest,
    ) -> Result<CreateEmployeeResponse, RegistryError> {
        panic!("Message")
    }
}
