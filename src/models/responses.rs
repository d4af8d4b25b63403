use serde::{Deserialize, Serialize};
use crate::core::EngineDump;
use crate::models::domain::{HeightBucket, PersonView};

/// Response for the add-person endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPersonResponse {
    pub person: PersonView,
    pub matches: Vec<PersonView>,
}

/// List of people
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleResponse {
    pub people: Vec<PersonView>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub population: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Diagnostic dump of both trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpResponse {
    pub male: Vec<HeightBucket>,
    pub female: Vec<HeightBucket>,
}

impl From<EngineDump> for DumpResponse {
    fn from(dump: EngineDump) -> Self {
        Self {
            male: dump.male,
            female: dump.female,
        }
    }
}
