use crate::models::domain::{ChatMessage, Job, JobRole, User, UserKind, TECH_TAGS};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Body of a user create or full replace
///
/// Only the fields of the declared `userType` are accepted; sending the other
/// type's fields fails deserialization. `_id` and `createdAt` may be echoed
/// back from a fetched document and are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(rename = "_id", alias = "id", default, skip_serializing)]
    pub echoed_id: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing)]
    pub echoed_created_at: Option<serde_json::Value>,
    #[serde(flatten)]
    pub kind: UserKind,
}

impl NewUser {
    /// Validate common fields, then the fields required by the `userType`
    pub fn check(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        self.kind.validate()
    }

    pub fn into_user(self) -> User {
        User {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            email: self.email.trim().to_lowercase(),
            created_at: Utc::now(),
            kind: self.kind,
        }
    }

    /// Replace every field of `existing` except its identity and creation time
    pub fn replace(self, existing: &User) -> User {
        User {
            id: existing.id.clone(),
            created_at: existing.created_at,
            ..self.into_user()
        }
    }
}

/// Body of a job create or full replace
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewJob {
    pub role: JobRole,
    #[validate(range(min = 0.0))]
    pub pay: f64,
    #[validate(length(max = 256))]
    #[serde(default)]
    pub location: Option<String>,
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_tags"))]
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewJob {
    pub fn into_job(self, id: String) -> Job {
        Job {
            id,
            role: self.role,
            pay: self.pay,
            location: self.location,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Query string of the travel-time lookup
#[derive(Debug, Clone, Deserialize)]
pub struct TravelTimeQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(default)]
    pub mode: Option<crate::models::domain::TravelMode>,
}

/// Request to the conversational assistant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[serde(rename = "systemPrompt", default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[validate(length(min = 1))]
    pub message: String,
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    match tags.iter().find(|tag| !TECH_TAGS.contains(&tag.as_str())) {
        Some(unknown) => {
            let mut err = ValidationError::new("unknown_tag");
            err.message = Some(format!("unknown tag: {}", unknown).into());
            Err(err)
        }
        None => Ok(()),
    }
}
