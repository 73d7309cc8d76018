use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{
    check_link, optional_text, require_text, require_text_opt, ResourceError,
};

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub author: String,
    pub rating: i16,
    pub body: String,
    pub avatar_url: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub author: String,
    pub rating: i16,
    pub body: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub business_line: Option<BusinessLine>,
    pub author: Option<String>,
    pub rating: Option<i16>,
    pub body: Option<String>,
    pub avatar_url: Option<String>,
    pub published: Option<bool>,
}

fn default_published() -> bool {
    true
}

fn check_rating(rating: i16) -> Result<i16, ResourceError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ResourceError::invalid(format!(
            "'rating' must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

impl Review {
    /// Filled and empty stars, for the templates.
    pub fn stars(&self) -> String {
        let filled = self.rating.clamp(0, MAX_RATING) as usize;
        format!(
            "{}{}",
            "★".repeat(filled),
            "☆".repeat(MAX_RATING as usize - filled)
        )
    }
}

impl ReviewCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        let avatar_url = optional_text(self.avatar_url.as_deref());
        check_link("avatar_url", avatar_url.as_deref())?;

        Ok(Self {
            author: require_text("author", &self.author)?,
            rating: check_rating(self.rating)?,
            body: require_text("body", &self.body)?,
            avatar_url,
            ..self
        })
    }
}

impl ReviewUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                author: None,
                rating: None,
                body: None,
                avatar_url: None,
                published: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        let avatar_url = self.avatar_url.map(|s| s.trim().to_string());
        check_link("avatar_url", avatar_url.as_deref())?;

        Ok(Self {
            author: require_text_opt("author", self.author.as_deref())?,
            rating: self.rating.map(check_rating).transpose()?,
            body: require_text_opt("body", self.body.as_deref())?,
            avatar_url,
            ..self
        })
    }
}
