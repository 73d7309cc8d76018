use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{require_text, require_text_opt, ResourceError};
use crate::services::media;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub title: String,
    pub url: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoUpdate {
    pub business_line: Option<BusinessLine>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub position: Option<i32>,
}

/// Full ordering of the video list, first id gets position 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoOrder {
    pub ids: Vec<Uuid>,
}

impl Video {
    /// `None` for rows stored before links were limited to YouTube; those
    /// render as a plain link.
    pub fn embed_url(&self) -> Option<String> {
        media::embed_url(&self.url)
    }
}

fn youtube_url(value: &str) -> Result<String, ResourceError> {
    let url = require_text("url", value)?;
    if media::youtube_id(&url).is_none() {
        return Err(ResourceError::invalid(
            "'url' must be a YouTube video link",
        ));
    }
    Ok(url)
}

impl VideoCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        Ok(Self {
            title: require_text("title", &self.title)?,
            url: youtube_url(&self.url)?,
            ..self
        })
    }
}

impl VideoUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                title: None,
                url: None,
                position: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        Ok(Self {
            title: require_text_opt("title", self.title.as_deref())?,
            url: self.url.as_deref().map(youtube_url).transpose()?,
            ..self
        })
    }
}

impl VideoOrder {
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.ids.is_empty() {
            return Err(ResourceError::invalid("'ids' must not be empty"));
        }

        let mut seen = std::collections::HashSet::with_capacity(self.ids.len());
        if let Some(dup) = self.ids.iter().find(|id| !seen.insert(**id)) {
            return Err(ResourceError::invalid(format!(
                "Video {dup} appears more than once"
            )));
        }

        Ok(())
    }
}
