//! Translation between the caller-facing shapes and the registry contract.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use super::domain::{EmployeeData, EmployeeRequest, EmployeeResponse};
use super::registry::{
    CreateEmployeeRequest, CreateEmployeeResponse, RegistryDate, RegistryEmployee,
    RegistryEmployeeRequest,
};

/// Raised when a registry payload cannot be expressed in the caller-facing shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("registry returned an unrepresentable {field}: {value}")]
    Date { field: &'static str, value: String },
    #[error("registry returned an unrepresentable salary: {0}")]
    Salary(String),
}

/// Build the registry request from an already validated request.
pub fn to_registry_request(request: &EmployeeRequest) -> CreateEmployeeRequest {
    let birth_date = request
        .birth_date
        .and_then(|date| to_registry_date("birth date", date));
    let job_start_date = request
        .job_start_date
        .and_then(|date| to_registry_date("job start date", date));

    CreateEmployeeRequest {
        request: RegistryEmployeeRequest {
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            document_type: request.document_type.clone(),
            document_number: request.document_number.clone(),
            birth_date,
            job_start_date,
            title: request.title.clone(),
            salary: salary_to_decimal(request.salary),
        },
    }
}

/// Registry accepted the employee: copy its verdict and the confirmed record.
pub fn successful_response(
    response: CreateEmployeeResponse,
) -> Result<EmployeeResponse, MappingError> {
    let CreateEmployeeResponse {
        status,
        error_response_message,
        response,
    } = response;

    let employee_data = response.map(employee_data).transpose()?;

    Ok(EmployeeResponse {
        status,
        error_message: error_response_message,
        employee_data,
    })
}

/// Registry refused the employee; its status and message pass through untouched.
pub fn failed_response(status: impl Into<String>, message: impl Into<String>) -> EmployeeResponse {
    EmployeeResponse {
        status: status.into(),
        error_message: message.into(),
        employee_data: None,
    }
}

/// The registry could not be reached or answered with garbage.
pub fn unexpected_response(
    status: impl Into<String>,
    message: impl Into<String>,
) -> EmployeeResponse {
    EmployeeResponse {
        status: status.into(),
        error_message: message.into(),
        employee_data: None,
    }
}

pub fn to_registry_date(field: &'static str, date: NaiveDate) -> Option<RegistryDate> {
    let converted = RegistryDate::from_naive(date);
    if converted.is_none() {
        warn!(field, %date, "date cannot be represented by the registry, sending it empty");
    }
    converted
}

pub fn from_registry_date(
    field: &'static str,
    date: &RegistryDate,
) -> Result<NaiveDate, MappingError> {
    date.to_naive().ok_or_else(|| MappingError::Date {
        field,
        value: date.to_string(),
    })
}

/// Re-express the salary through its shortest round-trip text, so `100.0` becomes `100`
/// and `1234.56` stays `1234.56` rather than the nearest binary fraction.
pub fn salary_to_decimal(salary: f64) -> Option<Decimal> {
    if !salary.is_finite() {
        warn!(salary, "salary is not a finite number, sending it empty");
        return None;
    }

    // Parsing rounds past 28 fractional digits, so only exact round trips are kept.
    let decimal = Decimal::from_str(&salary.to_string())
        .or_else(|_| Decimal::from_scientific(&format!("{salary:e}")))
        .ok()
        .filter(|decimal| salary_from_decimal(decimal) == Ok(salary));
    if decimal.is_none() {
        warn!(salary, "salary cannot be represented as a decimal, sending it empty");
    }
    decimal
}

pub fn salary_from_decimal(salary: &Decimal) -> Result<f64, MappingError> {
    f64::from_str(&salary.to_string()).map_err(|_| MappingError::Salary(salary.to_string()))
}

fn employee_data(employee: RegistryEmployee) -> Result<EmployeeData, MappingError> {
    Ok(EmployeeData {
        birth_date: from_registry_date("birth date", &employee.birth_date)?,
        job_start_date: from_registry_date("job start date", &employee.job_start_date)?,
        salary: salary_from_decimal(&employee.salary)?,
        first_name: employee.first_name,
        last_name: employee.last_name,
        document_type: employee.document_type,
        document_number: employee.document_number,
        age: employee.age,
        tenure_since_start: employee.tenure_since_start,
        title: employee.title,
    })
}
