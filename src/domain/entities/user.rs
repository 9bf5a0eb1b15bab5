use std::fmt;

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};
use uuid::Uuid;

use crate::domain::password::validate_password_strength;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Employer,
    Candidate,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "ADMIN",
            Role::Employer => "EMPLOYER",
            Role::Candidate => "CANDIDATE",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserInsert {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    /// Set only for employers; the company row is written with the user.
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_company_for_role", skip_on_field_errors = false))]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 8, message = "Must be at least 8 characters"),
        custom(
            function = "validate_password_strength",
            message = "Must include uppercase, number, and symbol"
        )
    )]
    pub password: String,

    #[validate(custom(function = "validate_registrable_role"))]
    pub role: Role,

    #[validate(length(min = 2, max = 120, message = "Company name must be 2-120 characters"))]
    pub company_name: Option<String>,
}

fn validate_registrable_role(role: &Role) -> Result<(), ValidationError> {
    if *role == Role::Admin {
        let mut error = ValidationError::new("role");
        error.message = Some("Only EMPLOYER or CANDIDATE accounts can be registered".into());
        return Err(error);
    }
    Ok(())
}

fn validate_company_for_role(user: &NewUser) -> Result<(), ValidationError> {
    let has_company = user
        .company_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());

    if user.role == Role::Employer && !has_company {
        let mut error = ValidationError::new("company_name");
        error.message = Some("Employers must provide a company name".into());
        return Err(error);
    }
    Ok(())
}

impl NewUser {
    pub fn prepare_for_insert(&self, password_hash: String) -> UserInsert {
        UserInsert {
            email: self.email.trim().to_lowercase(),
            password_hash,
            role: self.role,
            company_name: self.company_name().map(str::to_string),
        }
    }

    /// Company to create alongside the user; only employers own one.
    pub fn company_name(&self) -> Option<&str> {
        match self.role {
            Role::Employer => self.company_name.as_deref().map(str::trim),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewUserResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
