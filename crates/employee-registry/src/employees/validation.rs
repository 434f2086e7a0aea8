//! Field-level admission rules for registration requests.
//!
//! Rules run in [`RULE_ORDER`] and evaluation stops at the first violation, so a request is
//! only ever rejected with a single message. Later rules may assume earlier ones passed: the
//! job start date check relies on the birth date being present.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::domain::{DocumentType, EmployeeRequest};

pub const ERROR_STATUS: &str = "Error";

pub const INVALID_DOCUMENT_TYPE: &str = "The document type is not valid";
pub const INVALID_DOCUMENT_NUMBER: &str = "The document number is not valid";
pub const INVALID_SALARY: &str = "The salary is not valid";
pub const INVALID_FIRST_NAME: &str = "The first name is not valid";
pub const INVALID_LAST_NAME: &str = "The last name is not valid";
pub const INVALID_BIRTH_DATE: &str = "The birth date is not valid";
pub const INVALID_JOB_START_DATE: &str = "The job start date is not valid";
pub const INVALID_TITLE: &str = "The cargo is not valid";

static DOCUMENT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("document number pattern compiles"));

/// Result of running the rule chain over a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid {
        status: &'static str,
        message: &'static str,
    },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// A single admission rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Name,
    BirthDate,
    JobStartDate,
    Salary,
    Title,
    DocumentType,
    DocumentNumber,
}

pub const RULE_ORDER: [Rule; 7] = [
    Rule::Name,
    Rule::BirthDate,
    Rule::JobStartDate,
    Rule::Salary,
    Rule::Title,
    Rule::DocumentType,
    Rule::DocumentNumber,
];

impl Rule {
    /// Returns the rejection message when the request violates this rule.
    pub fn check(self, request: &EmployeeRequest, today: NaiveDate) -> Result<(), &'static str> {
        match self {
            // Last name is only inspected once the first name has passed.
            Rule::Name => {
                if is_blank(request.first_name.as_deref()) {
                    Err(INVALID_FIRST_NAME)
                } else if is_blank(request.last_name.as_deref()) {
                    Err(INVALID_LAST_NAME)
                } else {
                    Ok(())
                }
            }
            Rule::BirthDate => request.birth_date.map(|_| ()).ok_or(INVALID_BIRTH_DATE),
            Rule::JobStartDate => match (request.job_start_date, request.birth_date) {
                (Some(start), Some(birth)) if start <= today && start >= birth => Ok(()),
                _ => Err(INVALID_JOB_START_DATE),
            },
            Rule::Salary => {
                if request.salary > 0.0 {
                    Ok(())
                } else {
                    Err(INVALID_SALARY)
                }
            }
            Rule::Title => {
                if is_blank(request.title.as_deref()) {
                    Err(INVALID_TITLE)
                } else {
                    Ok(())
                }
            }
            Rule::DocumentType => request
                .document_type
                .as_deref()
                .and_then(DocumentType::from_code)
                .map(|_| ())
                .ok_or(INVALID_DOCUMENT_TYPE),
            Rule::DocumentNumber => match request.document_number.as_deref() {
                Some(number) if DOCUMENT_NUMBER.is_match(number) => Ok(()),
                _ => Err(INVALID_DOCUMENT_NUMBER),
            },
        }
    }
}

/// Validate against the local calendar date.
pub fn validate(request: &EmployeeRequest) -> ValidationOutcome {
    validate_on(request, Local::now().date_naive())
}

/// Validate with an explicit notion of "today".
pub fn validate_on(request: &EmployeeRequest, today: NaiveDate) -> ValidationOutcome {
    RULE_ORDER
        .iter()
        .find_map(|rule| rule.check(request, today).err())
        .map_or(ValidationOutcome::Valid, |message| {
            ValidationOutcome::Invalid {
                status: ERROR_STATUS,
                message,
            }
        })
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.chars().all(is_blank_char))
}

/// No-break spaces count as content; the information separators count as blank.
fn is_blank_char(c: char) -> bool {
    match c {
        '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\u{0085}' => false,
        '\u{001C}'..='\u{001F}' => true,
        _ => c.is_whitespace(),
    }
}
