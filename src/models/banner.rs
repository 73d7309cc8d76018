use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{
    check_link, optional_text, require_text, require_text_opt, ResourceError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Banner {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub active: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub image_url: String,
    #[serde(default)]
    pub cta_label: Option<String>,
    #[serde(default)]
    pub cta_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerUpdate {
    pub business_line: Option<BusinessLine>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub active: Option<bool>,
    pub position: Option<i32>,
}

fn default_active() -> bool {
    true
}

impl Banner {
    pub fn has_cta(&self) -> bool {
        self.cta_label.is_some() && self.cta_url.is_some()
    }
}

impl BannerCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        let banner = Self {
            title: require_text("title", &self.title)?,
            subtitle: self.subtitle.trim().to_string(),
            image_url: require_text("image_url", &self.image_url)?,
            cta_label: optional_text(self.cta_label.as_deref()),
            cta_url: optional_text(self.cta_url.as_deref()),
            ..self
        };
        check_link("image_url", Some(banner.image_url.as_str()))?;
        check_link("cta_url", banner.cta_url.as_deref())?;
        Ok(banner)
    }
}

impl BannerUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                title: None,
                subtitle: None,
                image_url: None,
                cta_label: None,
                cta_url: None,
                active: None,
                position: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        let update = Self {
            title: require_text_opt("title", self.title.as_deref())?,
            subtitle: self.subtitle.map(|s| s.trim().to_string()),
            image_url: require_text_opt("image_url", self.image_url.as_deref())?,
            cta_label: self.cta_label.map(|s| s.trim().to_string()),
            cta_url: self.cta_url.map(|s| s.trim().to_string()),
            ..self
        };
        check_link("image_url", update.image_url.as_deref())?;
        check_link("cta_url", update.cta_url.as_deref())?;
        Ok(update)
    }
}
