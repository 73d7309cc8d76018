use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::{require_text, require_text_opt, ResourceError};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Milestone {
    pub id: Uuid,
    pub year: i32,
    pub title: String,
    pub description: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneCreate {
    pub year: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestoneUpdate {
    pub year: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}

fn check_year(year: i32) -> Result<i32, ResourceError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ResourceError::invalid(format!(
            "'year' must be between {MIN_YEAR} and {MAX_YEAR}"
        )))
    }
}

impl MilestoneCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        Ok(Self {
            year: check_year(self.year)?,
            title: require_text("title", &self.title)?,
            description: self.description.trim().to_string(),
            ..self
        })
    }
}

impl MilestoneUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                year: None,
                title: None,
                description: None,
                position: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        Ok(Self {
            year: self.year.map(check_year).transpose()?,
            title: require_text_opt("title", self.title.as_deref())?,
            description: self.description.map(|s| s.trim().to_string()),
            ..self
        })
    }
}
