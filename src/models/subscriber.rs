use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::{normalize_email, validate_email, ResourceError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberCreate {
    pub email: String,
}

impl SubscriberCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        if !validate_email(&self.email) {
            return Err(ResourceError::invalid("Please enter a valid email address"));
        }
        Ok(Self {
            email: normalize_email(&self.email),
        })
    }
}
