use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{
    check_link, optional_text, require_text, require_text_opt, ResourceError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub photo_url: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamMemberUpdate {
    pub business_line: Option<BusinessLine>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub position: Option<i32>,
}

impl TeamMember {
    /// Initials for members without a photo.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl TeamMemberCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        let photo_url = optional_text(self.photo_url.as_deref());
        check_link("photo_url", photo_url.as_deref())?;

        Ok(Self {
            name: require_text("name", &self.name)?,
            role: require_text("role", &self.role)?,
            bio: self.bio.trim().to_string(),
            photo_url,
            ..self
        })
    }
}

impl TeamMemberUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                name: None,
                role: None,
                bio: None,
                photo_url: None,
                position: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        let photo_url = self.photo_url.map(|s| s.trim().to_string());
        check_link("photo_url", photo_url.as_deref())?;

        Ok(Self {
            name: require_text_opt("name", self.name.as_deref())?,
            role: require_text_opt("role", self.role.as_deref())?,
            bio: self.bio.map(|s| s.trim().to_string()),
            photo_url,
            ..self
        })
    }
}
