use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillRequest {
    #[validate(length(min = 1, max = 100, message = "Skill must be 1-100 characters"))]
    pub skill: String,

    /// Required experience with the skill, in months.
    #[validate(range(min = 0, max = 600, message = "Duration must be between 0 and 600 months"))]
    pub duration: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillInsert {
    pub skill: String,
    pub duration: i32,
}

impl From<&SkillRequest> for SkillInsert {
    fn from(request: &SkillRequest) -> Self {
        SkillInsert {
            skill: request.skill.trim().to_string(),
            duration: request.duration,
        }
    }
}
