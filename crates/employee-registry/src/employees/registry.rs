use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Boundary to the external employee registry. One synchronous call per registration.
pub trait EmployeeRegistry: Send + Sync {
    fn create_employee(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<CreateEmployeeResponse, RegistryError>;
}

/// Any fault raised while talking to the registry. The display text is what callers see.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{0}")]
    Transport(String),
    #[error("registry call timed out: {0}")]
    Timeout(String),
    #[error("registry responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Decode(String),
    #[error("registry client unavailable: {0}")]
    Client(String),
}

/// Envelope expected by the registry's `createEmployee` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub request: RegistryEmployeeRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<RegistryDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_start_date: Option<RegistryDate>,
    #[serde(rename = "cargo")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,
}

/// Registry reply. `response` is absent when the registry refused the registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error_response_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<RegistryEmployee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEmployee {
    pub first_name: String,
    pub last_name: String,
    pub document_type: String,
    pub document_number: String,
    pub birth_date: RegistryDate,
    pub job_start_date: RegistryDate,
    #[serde(default)]
    pub age: String,
    #[serde(default, rename = "dateSinceJobStart")]
    pub tenure_since_start: String,
    #[serde(rename = "cargo")]
    pub title: String,
    pub salary: Decimal,
}

const MAX_TIMEZONE_MINUTES: i16 = 14 * 60;

/// Calendar date in the registry's XML-schema `date` form: `YYYY-MM-DD` with an optional
/// `Z` or `±HH:MM` zone suffix.
///
/// Fields are range-checked individually, so a value such as `2021-02-30` is accepted here
/// and only fails when turned into a [`NaiveDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryDate {
    year: i32,
    month: u32,
    day: u32,
    timezone_minutes: Option<i16>,
}

impl RegistryDate {
    pub fn new(year: i32, month: u32, day: u32, timezone_minutes: Option<i16>) -> Option<Self> {
        let zone_ok = timezone_minutes.map_or(true, |minutes| {
            (-MAX_TIMEZONE_MINUTES..=MAX_TIMEZONE_MINUTES).contains(&minutes)
        });

        if (1..=9999).contains(&year)
            && (1..=12).contains(&month)
            && (1..=31).contains(&day)
            && zone_ok
        {
            Some(Self {
                year,
                month,
                day,
                timezone_minutes,
            })
        } else {
            None
        }
    }

    /// `None` when the year falls outside what the registry can encode.
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month(), date.day(), None)
    }

    /// `None` when the fields do not name a real calendar day.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn timezone_minutes(&self) -> Option<i16> {
        self.timezone_minutes
    }
}

impl fmt::Display for RegistryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        match self.timezone_minutes {
            None => Ok(()),
            Some(0) => f.write_str("Z"),
            Some(minutes) => {
                let sign = if minutes < 0 { '-' } else { '+' };
                let minutes = minutes.unsigned_abs();
                write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a registry date (expected YYYY-MM-DD with optional zone)")]
pub struct RegistryDateError(pub String);

impl FromStr for RegistryDate {
    type Err = RegistryDateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistryDateError(raw.to_string());
        let value = raw.trim();

        let date = value.get(..10).ok_or_else(invalid)?;
        let zone = value.get(10..).ok_or_else(invalid)?;
        let bytes = date.as_bytes();
        if bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }

        let year = digits(&date[..4]).ok_or_else(invalid)?;
        let month = digits(&date[5..7]).ok_or_else(invalid)?;
        let day = digits(&date[8..10]).ok_or_else(invalid)?;
        let timezone_minutes = parse_zone(zone).ok_or_else(invalid)?;

        RegistryDate::new(year as i32, month, day, timezone_minutes).ok_or_else(invalid)
    }
}

fn digits(text: &str) -> Option<u32> {
    if text.bytes().all(|byte| byte.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

/// Outer `None` means malformed; inner `None` means no zone was given.
fn parse_zone(zone: &str) -> Option<Option<i16>> {
    match zone {
        "" => Some(None),
        "Z" => Some(Some(0)),
        _ => {
            let sign = match zone.as_bytes().first()? {
                b'+' => 1,
                b'-' => -1,
                _ => return None,
            };
            if zone.len() != 6 || zone.as_bytes()[3] != b':' {
                return None;
            }
            let hours = digits(zone.get(1..3)?)?;
            let minutes = digits(zone.get(4..6)?)?;
            if minutes >= 60 {
                return None;
            }
            let total = i16::try_from(hours * 60 + minutes).ok()?;
            Some(Some(sign * total))
        }
    }
}

impl Serialize for RegistryDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RegistryDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
