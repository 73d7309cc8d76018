use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{
    normalize_email, optional_text, require_text, validate_email, validate_phone,
    ResourceError,
};

pub const MAX_MESSAGE_LEN: usize = 5000;

/// A submission of the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FormMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_line: BusinessLine,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormMessageCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub business_line: BusinessLine,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormMessageUpdate {
    pub read: bool,
}

impl FormMessage {
    /// First line of the message, cut for the admin table.
    pub fn preview(&self) -> String {
        let first = self.message.lines().next().unwrap_or_default();
        if first.chars().count() > 80 {
            let cut: String = first.chars().take(80).collect();
            format!("{cut}…")
        } else {
            first.to_string()
        }
    }
}

impl FormMessageCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        if !validate_email(&self.email) {
            return Err(ResourceError::invalid("Please enter a valid email address"));
        }

        let phone = optional_text(self.phone.as_deref());
        if let Some(p) = &phone {
            if !validate_phone(p) {
                return Err(ResourceError::invalid("Please enter a valid phone number"));
            }
        }

        let message = require_text("message", &self.message)?;
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(ResourceError::invalid(format!(
                "'message' must be at most {MAX_MESSAGE_LEN} characters"
            )));
        }

        Ok(Self {
            name: require_text("name", &self.name)?,
            email: normalize_email(&self.email),
            phone,
            subject: optional_text(self.subject.as_deref()),
            message,
            ..self
        })
    }
}
