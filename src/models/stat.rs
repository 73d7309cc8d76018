use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{require_text, require_text_opt, ResourceError};

/// A headline number on the public pages ("5000+ kits installed").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Stat {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub label: String,
    pub value: i64,
    pub suffix: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub label: String,
    pub value: i64,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatUpdate {
    pub business_line: Option<BusinessLine>,
    pub label: Option<String>,
    pub value: Option<i64>,
    pub suffix: Option<String>,
    pub position: Option<i32>,
}

fn check_value(value: i64) -> Result<i64, ResourceError> {
    if value < 0 {
        return Err(ResourceError::invalid("'value' must not be negative"));
    }
    Ok(value)
}

impl Stat {
    pub fn display_value(&self) -> String {
        format!("{}{}", self.value, self.suffix)
    }
}

impl StatCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        Ok(Self {
            label: require_text("label", &self.label)?,
            value: check_value(self.value)?,
            suffix: self.suffix.trim().to_string(),
            ..self
        })
    }
}

impl StatUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                label: None,
                value: None,
                suffix: None,
                position: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        Ok(Self {
            label: require_text_opt("label", self.label.as_deref())?,
            value: self.value.map(check_value).transpose()?,
            suffix: self.suffix.map(|s| s.trim().to_string()),
            ..self
        })
    }
}
