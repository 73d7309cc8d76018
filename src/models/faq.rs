use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{require_text, require_text_opt, ResourceError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub question: String,
    pub answer: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqUpdate {
    pub business_line: Option<BusinessLine>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub position: Option<i32>,
}

impl Faq {
    /// Case-insensitive substring match over question and answer.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.question.to_lowercase().contains(&needle)
            || self.answer.to_lowercase().contains(&needle)
    }
}

impl FaqCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        Ok(Self {
            question: require_text("question", &self.question)?,
            answer: require_text("answer", &self.answer)?,
            ..self
        })
    }
}

impl FaqUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                question: None,
                answer: None,
                position: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        Ok(Self {
            question: require_text_opt("question", self.question.as_deref())?,
            answer: require_text_opt("answer", self.answer.as_deref())?,
            ..self
        })
    }
}
