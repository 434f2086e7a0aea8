//! Employee registration: request validation, registry mapping and outcome translation.

pub mod client;
pub mod domain;
pub mod mapping;
pub mod registry;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use client::HttpEmployeeRegistry;
pub use domain::{DocumentType, EmployeeData, EmployeeRequest, EmployeeResponse};
pub use mapping::MappingError;
pub use registry::{
    CreateEmployeeRequest, CreateEmployeeResponse, EmployeeRegistry, RegistryDate,
    RegistryEmployee, RegistryEmployeeRequest, RegistryError,
};
pub use router::employee_router;
pub use service::{EmployeeService, Registration, RegistrationOutcome};
pub use validation::{validate, validate_on, ValidationOutcome, ERROR_STATUS};
