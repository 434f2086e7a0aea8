use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity documents accepted by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Cédula de ciudadanía.
    #[serde(rename = "CC")]
    CitizenId,
    /// Tarjeta de identidad, issued to minors.
    #[serde(rename = "TI")]
    MinorId,
    /// Cédula de extranjería.
    #[serde(rename = "CE")]
    ForeignResidentId,
    /// Pasaporte.
    #[serde(rename = "PP")]
    Passport,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::CitizenId,
        DocumentType::MinorId,
        DocumentType::ForeignResidentId,
        DocumentType::Passport,
    ];

    pub fn code(self) -> &'static str {
        match self {
            DocumentType::CitizenId => "CC",
            DocumentType::MinorId => "TI",
            DocumentType::ForeignResidentId => "CE",
            DocumentType::Passport => "PP",
        }
    }

    /// Exact, case-sensitive lookup of a document code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// Inbound registration payload. Every field may be missing on the wire; the validator decides
/// which absences are fatal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(
        default,
        with = "iso_date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "iso_date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_start_date: Option<NaiveDate>,
    #[serde(default, alias = "cargo")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable_salary")]
    pub salary: f64,
}

/// Caller-facing result of a registration attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub status: String,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_data: Option<EmployeeData>,
}

impl EmployeeResponse {
    pub fn is_registered(&self) -> bool {
        self.employee_data.is_some()
    }
}

/// Employee record as confirmed by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeData {
    pub first_name: String,
    pub last_name: String,
    pub document_type: String,
    pub document_number: String,
    #[serde(with = "iso_date")]
    pub birth_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub job_start_date: NaiveDate,
    pub age: String,
    pub tenure_since_start: String,
    pub title: String,
    pub salary: f64,
}

pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// An explicit `null` salary reads as zero, like a missing one.
fn nullable_salary<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// `YYYY-MM-DD` serde adapters for caller-facing dates.
mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).map_err(serde::de::Error::custom)
    }

    pub mod optional {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let opt = Option::<String>::deserialize(deserializer)?;
            opt.map(|value| super::super::parse_iso_date(&value).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
