use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    entities::{
        reference::ReferenceSummary,
        skill::{SkillInsert, SkillRequest},
    },
    errors::AppError,
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 150;
const MIN_DESCRIPTION_LENGTH: u64 = 10;
const MAX_LONG_TEXT_LENGTH: u64 = 5000;
const MAX_SHORT_TEXT_LENGTH: u64 = 150;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub vacancy: i32,
    pub deadline: DateTime<Utc>,
    pub min_salary: i32,
    pub max_salary: i32,
    pub experience_in_months: i32,
    pub job_type: String,
    pub min_age: Option<i32>,
    pub job_description: String,
    pub job_requirements: Option<String>,
    pub degree_name: Option<String>,
    pub degree_title: Option<String>,
    pub compensation_benefits: Option<String>,
    pub negotiable: bool,
    pub industry_id: Uuid,
    pub department_id: Uuid,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub address_line: String,
    pub district: String,
    pub job_id: Uuid,
}

/// Job row joined with the names of its department and industry.
#[derive(Debug, sqlx::FromRow)]
pub struct JobListingRow {
    #[sqlx(flatten)]
    pub job: Job,
    pub department_name: String,
    pub industry_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobInsert {
    pub title: String,
    pub vacancy: i32,
    pub deadline: DateTime<Utc>,
    pub min_salary: i32,
    pub max_salary: i32,
    pub experience_in_months: i32,
    pub job_type: String,
    pub min_age: Option<i32>,
    pub job_description: String,
    pub job_requirements: Option<String>,
    pub degree_name: Option<String>,
    pub degree_title: Option<String>,
    pub compensation_benefits: Option<String>,
    pub negotiable: bool,
    pub industry_id: Uuid,
    pub department_id: Uuid,
    pub company_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressInsert {
    pub address_line: String,
    pub district: String,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedJobResponse {
    pub job: Job,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(flatten)]
    pub job: Job,
    pub department: ReferenceSummary,
    pub industry: ReferenceSummary,
}

impl From<JobListingRow> for JobListing {
    fn from(row: JobListingRow) -> Self {
        JobListing {
            department: ReferenceSummary {
                id: row.job.department_id,
                name: row.department_name,
            },
            industry: ReferenceSummary {
                id: row.job.industry_id,
                name: row.industry_name,
            },
            job: row.job,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCountResponse {
    pub count: i64,
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_salary_range", skip_on_field_errors = false))]
pub struct CreateJobRequest {
    #[validate(length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH))]
    pub title: String,

    #[validate(range(min = 1, message = "Vacancy must be at least 1"))]
    pub vacancy: i32,

    #[validate(custom(function = "validate_deadline"))]
    pub deadline: String,

    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub min_salary: i32,

    #[validate(range(min = 0, message = "Salary cannot be negative"))]
    pub max_salary: i32,

    #[validate(range(min = 0, max = 600, message = "Experience must be between 0 and 600 months"))]
    pub experience_in_months: i32,

    #[validate(length(min = 1, max = 50, message = "Job type must be 1-50 characters"))]
    pub job_type: String,

    #[validate(range(min = 14, max = 100, message = "Minimum age must be between 14 and 100"))]
    pub min_age: Option<i32>,

    #[validate(length(min = MIN_DESCRIPTION_LENGTH, max = MAX_LONG_TEXT_LENGTH))]
    pub job_description: String,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub job_requirements: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub degree_name: Option<String>,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub degree_title: Option<String>,

    #[validate(length(max = MAX_LONG_TEXT_LENGTH))]
    pub compensation_benefits: Option<String>,

    #[serde(default)]
    pub negotiable: bool,

    pub industry_id: Uuid,

    pub department_id: Uuid,

    #[validate(length(min = 2, max = 200, message = "Address line must be 2-200 characters"))]
    pub address_line: String,

    #[validate(length(min = 2, max = 100, message = "District must be 2-100 characters"))]
    pub district: String,

    #[serde(default)]
    #[validate(nested)]
    pub skills: Vec<SkillRequest>,
}

impl CreateJobRequest {
    /// Splits the payload into the three rows written by the create transaction.
    pub fn into_inserts(
        self,
        company_id: Uuid,
        deadline: DateTime<Utc>,
    ) -> (JobInsert, AddressInsert, Vec<SkillInsert>) {
        let skills = self.skills.iter().map(SkillInsert::from).collect();

        let address = AddressInsert {
            address_line: self.address_line.trim().to_string(),
            district: self.district.trim().to_string(),
        };

        let job = JobInsert {
            title: self.title.trim().to_string(),
            vacancy: self.vacancy,
            deadline,
            min_salary: self.min_salary,
            max_salary: self.max_salary,
            experience_in_months: self.experience_in_months,
            job_type: self.job_type,
            min_age: self.min_age,
            job_description: self.job_description,
            job_requirements: self.job_requirements,
            degree_name: self.degree_name,
            degree_title: self.degree_title,
            compensation_benefits: self.compensation_benefits,
            negotiable: self.negotiable,
            industry_id: self.industry_id,
            department_id: self.department_id,
            company_id,
        };

        (job, address, skills)
    }
}

fn validate_salary_range(request: &CreateJobRequest) -> Result<(), ValidationError> {
    if request.min_salary > request.max_salary {
        let mut error = ValidationError::new("salary_range");
        error.message = Some("minSalary cannot exceed maxSalary".into());
        return Err(error);
    }
    Ok(())
}

fn validate_deadline(raw: &str) -> Result<(), ValidationError> {
    parse_deadline(raw).map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("deadline");
        error.message = Some("Deadline must be an RFC 3339 timestamp or a YYYY-MM-DD date".into());
        error
    })
}

/// Coerces the deadline into a UTC timestamp. Bare dates resolve to midnight UTC.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(parsed.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| AppError::InvalidRequest(format!("Invalid deadline: {}", raw)))
}
