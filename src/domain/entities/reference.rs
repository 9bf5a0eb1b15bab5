use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Reference tables a job must point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Industry,
    Department,
}

impl ReferenceKind {
    pub fn table(&self) -> &'static str {
        match self {
            ReferenceKind::Industry => "industries",
            ReferenceKind::Department => "departments",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReferenceKind::Industry => "Industry",
            ReferenceKind::Department => "Department",
        };
        write!(f, "{s}")
    }
}

/// Row shape shared by `industries` and `departments`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceItem {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewReferenceRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
}
