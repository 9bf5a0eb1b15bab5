use serde::Deserialize;
use uuid::Uuid;

/// Optional job search inputs, taken verbatim from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilters {
    pub query: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub department: Option<String>,
    pub min_experience: Option<String>,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
    pub negotiable: Option<String>,
}

/// One clause of a job search. Clauses are ANDed together.
#[derive(Debug, Clone, PartialEq)]
pub enum JobPredicate {
    /// Title OR company name contains the text, ignoring case.
    TitleOrCompanyContains(String),
    /// Address line OR district contains the text, ignoring case.
    LocationContains(String),
    IndustryNameContains(String),
    DepartmentNameContains(String),
    MinExperience(f64),
    MinSalary(f64),
    MaxSalary(f64),
    Negotiable(bool),
    CompanyId(Uuid),
}

impl JobFilters {
    pub fn predicates(&self) -> Vec<JobPredicate> {
        let mut predicates = Vec::new();

        if let Some(negotiable) = non_blank(&self.negotiable) {
            predicates.push(JobPredicate::Negotiable(negotiable.to_lowercase() == "true"));
        }
        if let Some(query) = non_blank(&self.query) {
            predicates.push(JobPredicate::TitleOrCompanyContains(query.to_string()));
        }
        if let Some(location) = non_blank(&self.location) {
            predicates.push(JobPredicate::LocationContains(location.to_string()));
        }
        if let Some(industry) = non_blank(&self.industry) {
            predicates.push(JobPredicate::IndustryNameContains(industry.to_string()));
        }
        if let Some(department) = non_blank(&self.department) {
            predicates.push(JobPredicate::DepartmentNameContains(department.to_string()));
        }
        if let Some(months) = non_zero_number(&self.min_experience) {
            predicates.push(JobPredicate::MinExperience(months));
        }
        if let Some(salary) = non_zero_number(&self.min_salary) {
            predicates.push(JobPredicate::MinSalary(salary));
        }
        if let Some(salary) = non_zero_number(&self.max_salary) {
            predicates.push(JobPredicate::MaxSalary(salary));
        }

        predicates
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Zero and anything that is not a finite number count as "not provided".
// Fractions and exponents ("5000.5", "1e1") are kept as given.
fn non_zero_number(value: &Option<String>) -> Option<f64> {
    non_blank(value)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v != 0.0)
}

/// Columns a job listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSortField {
    CreatedAt,
    UpdatedAt,
    Title,
    Deadline,
    Vacancy,
    MinSalary,
    MaxSalary,
    ExperienceInMonths,
}

impl JobSortField {
    /// Unknown names fall back to creation time.
    pub fn from_param(raw: &str) -> Self {
        match raw.trim() {
            "updatedAt" | "updated_at" => JobSortField::UpdatedAt,
            "title" => JobSortField::Title,
            "deadline" => JobSortField::Deadline,
            "vacancy" => JobSortField::Vacancy,
            "minSalary" | "min_salary" => JobSortField::MinSalary,
            "maxSalary" | "max_salary" => JobSortField::MaxSalary,
            "experienceInMonths" | "experience_in_months" => JobSortField::ExperienceInMonths,
            _ => JobSortField::CreatedAt,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            JobSortField::CreatedAt => "j.created_at",
            JobSortField::UpdatedAt => "j.updated_at",
            JobSortField::Title => "j.title",
            JobSortField::Deadline => "j.deadline",
            JobSortField::Vacancy => "j.vacancy",
            JobSortField::MinSalary => "j.min_salary",
            JobSortField::MaxSalary => "j.max_salary",
            JobSortField::ExperienceInMonths => "j.experience_in_months",
        }
    }
}

/// Wraps user text for a literal, case-insensitive substring match with `ILIKE`.
pub fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
