use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Gender, NewPerson};

/// Request to add a person and look for a match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddPersonRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(custom(function = "validate_height"))]
    pub height: f64,
    pub gender: Gender,
    #[serde(alias = "wanted_dates", rename = "wantedDates")]
    pub wanted_dates: u64,
}

fn validate_height(height: f64) -> Result<(), ValidationError> {
    if height.is_finite() && height > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("height_out_of_range"))
    }
}

impl From<AddPersonRequest> for NewPerson {
    fn from(req: AddPersonRequest) -> Self {
        NewPerson {
            name: req.name,
            height: req.height,
            gender: req.gender,
            wanted_dates: req.wanted_dates,
        }
    }
}

/// Request to match two people
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub id1: u64,
    pub id2: u64,
}

/// Query string for the single people lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinglePeopleQuery {
    pub num: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, height: f64) -> AddPersonRequest {
        AddPersonRequest {
            name: name.to_string(),
            height,
            gender: Gender::Male,
            wanted_dates: 1,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("Bob", 180.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(request("", 180.0).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_height() {
        assert!(request("Bob", 0.0).validate().is_err());
        assert!(request("Bob", f64::NAN).validate().is_err());
        assert!(request("Bob", f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_wanted_dates_required() {
        let json = r#"{"name":"Bob","height":180,"gender":"male"}"#;
        assert!(serde_json::from_str::<AddPersonRequest>(json).is_err());

        let json = r#"{"name":"Bob","height":180,"gender":"male","wantedDates":2}"#;
        let req: AddPersonRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.wanted_dates, 2);
    }
}
