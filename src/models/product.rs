use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{
    check_link, optional_text, require_text, require_text_opt, ResourceError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub name: String,
    pub description: String,
    pub price_label: Option<String>,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price_label: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

/// Partial update. An empty string clears `price_label` / `image_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub business_line: Option<BusinessLine>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_label: Option<String>,
    pub image_url: Option<String>,
    pub features: Option<Vec<String>>,
    pub position: Option<i32>,
}

pub(crate) fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ProductCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        let image_url = optional_text(self.image_url.as_deref());
        check_link("image_url", image_url.as_deref())?;

        Ok(Self {
            name: require_text("name", &self.name)?,
            description: self.description.trim().to_string(),
            price_label: optional_text(self.price_label.as_deref()),
            image_url,
            features: clean_list(self.features),
            ..self
        })
    }
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                name: None,
                description: None,
                price_label: None,
                image_url: None,
                features: None,
                position: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        let image_url = self.image_url.map(|s| s.trim().to_string());
        check_link("image_url", image_url.as_deref())?;

        Ok(Self {
            name: require_text_opt("name", self.name.as_deref())?,
            description: self.description.map(|s| s.trim().to_string()),
            price_label: self.price_label.map(|s| s.trim().to_string()),
            image_url,
            features: self.features.map(clean_list),
            ..self
        })
    }
}
