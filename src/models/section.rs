use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::product::clean_list;
use super::BusinessLine;
use crate::common::{
    check_link, require_text, require_text_opt, validate_slug, ResourceError,
};

/// An image/gallery block on one of the public pages, addressed by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Section {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub slug: String,
    pub title: String,
    pub body: String,
    pub images: Vec<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionUpdate {
    pub business_line: Option<BusinessLine>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub images: Option<Vec<String>>,
    pub position: Option<i32>,
}

fn check_slug(slug: &str) -> Result<String, ResourceError> {
    let slug = slug.trim();
    if !validate_slug(slug) {
        return Err(ResourceError::invalid(
            "'slug' may only contain lowercase letters, digits, '-' and '_'",
        ));
    }
    Ok(slug.to_string())
}

fn check_images(images: &[String]) -> Result<(), ResourceError> {
    images
        .iter()
        .try_for_each(|image| check_link("images", Some(image.as_str())))
}

impl SectionCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        let images = clean_list(self.images);
        check_images(&images)?;

        Ok(Self {
            slug: check_slug(&self.slug)?,
            title: require_text("title", &self.title)?,
            body: self.body.trim().to_string(),
            images,
            ..self
        })
    }
}

impl SectionUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                slug: None,
                title: None,
                body: None,
                images: None,
                position: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        let update = Self {
            slug: self.slug.as_deref().map(check_slug).transpose()?,
            title: require_text_opt("title", self.title.as_deref())?,
            body: self.body.map(|s| s.trim().to_string()),
            images: self.images.map(clean_list),
            ..self
        };
        if let Some(images) = &update.images {
            check_images(images)?;
        }
        Ok(update)
    }
}
