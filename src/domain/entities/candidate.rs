use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

const MAX_NAME_LENGTH: u64 = 120;
const MAX_SHORT_TEXT_LENGTH: u64 = 150;
const MAX_BIO_LENGTH: u64 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub experience_in_months: i32,
    pub expected_salary: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateInsert {
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub experience_in_months: i32,
    pub expected_salary: Option<i32>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub experience_in_months: Option<i32>,
    pub expected_salary: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidateRequest {
    #[validate(length(min = 2, max = MAX_NAME_LENGTH, message = "Full name must be 2-120 characters"))]
    pub full_name: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub headline: Option<String>,

    #[validate(length(max = MAX_BIO_LENGTH))]
    pub bio: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub location: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, max = 600, message = "Experience must be between 0 and 600 months"))]
    pub experience_in_months: i32,

    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub expected_salary: Option<i32>,
}

impl CreateCandidateRequest {
    pub fn into_insert(self, user_id: Uuid) -> CandidateInsert {
        CandidateInsert {
            user_id,
            full_name: self.full_name.trim().to_string(),
            phone: trimmed(self.phone),
            headline: trimmed(self.headline),
            bio: trimmed(self.bio),
            location: trimmed(self.location),
            experience_in_months: self.experience_in_months,
            expected_salary: self.expected_salary,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_has_changes", skip_on_field_errors = false))]
pub struct UpdateCandidateRequest {
    #[validate(length(min = 2, max = MAX_NAME_LENGTH, message = "Full name must be 2-120 characters"))]
    pub full_name: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub headline: Option<String>,

    #[validate(length(max = MAX_BIO_LENGTH))]
    pub bio: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub location: Option<String>,

    #[validate(range(min = 0, max = 600, message = "Experience must be between 0 and 600 months"))]
    pub experience_in_months: Option<i32>,

    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub expected_salary: Option<i32>,
}

impl From<UpdateCandidateRequest> for CandidateUpdate {
    fn from(request: UpdateCandidateRequest) -> Self {
        CandidateUpdate {
            full_name: request.full_name.map(|name| name.trim().to_string()),
            phone: trimmed(request.phone),
            headline: trimmed(request.headline),
            bio: trimmed(request.bio),
            location: trimmed(request.location),
            experience_in_months: request.experience_in_months,
            expected_salary: request.expected_salary,
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));

    if !allowed || !(7..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.message = Some("Phone must hold 7-15 digits".into());
        return Err(error);
    }
    Ok(())
}

fn validate_has_changes(request: &UpdateCandidateRequest) -> Result<(), ValidationError> {
    let empty = request.full_name.is_none()
        && request.phone.is_none()
        && request.headline.is_none()
        && request.bio.is_none()
        && request.location.is_none()
        && request.experience_in_months.is_none()
        && request.expected_salary.is_none();

    if empty {
        let mut error = ValidationError::new("no_changes");
        error.message = Some("At least one field must be provided".into());
        return Err(error);
    }
    Ok(())
}
