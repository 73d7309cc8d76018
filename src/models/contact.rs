use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::BusinessLine;
use crate::common::{
    check_link, optional_text, require_text, require_text_opt, validate_email,
    validate_phone, ResourceError,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ContactInfo {
    pub id: Uuid,
    pub business_line: BusinessLine,
    pub label: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub whatsapp: Option<String>,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfoCreate {
    #[serde(default)]
    pub business_line: BusinessLine,
    pub label: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
}

/// Partial update. An empty string clears an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfoUpdate {
    pub business_line: Option<BusinessLine>,
    pub label: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub map_url: Option<String>,
    pub whatsapp: Option<String>,
}

fn check_phone(field: &str, phone: Option<&str>) -> Result<(), ResourceError> {
    match phone {
        Some(p) if !p.is_empty() && !validate_phone(p) => Err(
            ResourceError::invalid(format!("'{field}' is not a valid phone number")),
        ),
        _ => Ok(()),
    }
}

fn check_email(email: Option<&str>) -> Result<(), ResourceError> {
    match email {
        Some(e) if !e.is_empty() && !validate_email(e) => {
            Err(ResourceError::invalid("'email' is not a valid email address"))
        }
        _ => Ok(()),
    }
}

impl ContactInfo {
    /// `tel:` target with separators stripped.
    pub fn phone_href(&self) -> Option<String> {
        self.phone.as_deref().map(|p| {
            let digits: String = p
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect();
            format!("tel:{digits}")
        })
    }

    pub fn whatsapp_href(&self) -> Option<String> {
        self.whatsapp.as_deref().map(|p| {
            let digits: String = p.chars().filter(char::is_ascii_digit).collect();
            format!("https://wa.me/{digits}")
        })
    }
}

impl ContactInfoCreate {
    pub fn normalized(self) -> Result<Self, ResourceError> {
        let phone = optional_text(self.phone.as_deref());
        let email = optional_text(self.email.as_deref());
        let whatsapp = optional_text(self.whatsapp.as_deref());

        if phone.is_none() && email.is_none() {
            return Err(ResourceError::invalid(
                "At least one of 'phone' or 'email' is required",
            ));
        }
        check_phone("phone", phone.as_deref())?;
        check_phone("whatsapp", whatsapp.as_deref())?;
        check_email(email.as_deref())?;
        let map_url = optional_text(self.map_url.as_deref());
        check_link("map_url", map_url.as_deref())?;

        Ok(Self {
            label: require_text("label", &self.label)?,
            phone,
            email,
            address: optional_text(self.address.as_deref()),
            map_url,
            whatsapp,
            ..self
        })
    }
}

impl ContactInfoUpdate {
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                business_line: None,
                label: None,
                phone: None,
                email: None,
                address: None,
                map_url: None,
                whatsapp: None,
            }
        )
    }

    pub fn normalized(self) -> Result<Self, ResourceError> {
        if self.is_empty() {
            return Err(ResourceError::invalid("No fields provided"));
        }

        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        let phone = trim(self.phone);
        let email = trim(self.email);
        let whatsapp = trim(self.whatsapp);

        check_phone("phone", phone.as_deref())?;
        check_phone("whatsapp", whatsapp.as_deref())?;
        check_email(email.as_deref())?;
        let map_url = trim(self.map_url);
        check_link("map_url", map_url.as_deref())?;

        Ok(Self {
            label: require_text_opt("label", self.label.as_deref())?,
            phone,
            email,
            address: trim(self.address),
            map_url,
            whatsapp,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> ContactInfoCreate {
        ContactInfoCreate {
            business_line: BusinessLine::FillingStation,
            label: "Station office".into(),
            phone: Some("+91 98765 43210".into()),
            email: None,
            address: Some("NH 48".into()),
            map_url: None,
            whatsapp: Some(" ".into()),
        }
    }

    #[test]
    fn contact_needs_phone_or_email() {
        let mut c = create();
        c.phone = None;
        assert!(c.normalized().is_err());
        assert!(create().normalized().is_ok());
    }

    #[test]
    fn invalid_phone_is_rejected() {
        let mut c = create();
        c.phone = Some("call me".into());
        assert!(c.normalized().is_err());
    }

    #[test]
    fn hrefs_strip_separators() {
        let c = create().normalized().unwrap();
        let info = ContactInfo {
            id: Uuid::new_v4(),
            business_line: c.business_line,
            label: c.label,
            phone: c.phone,
            email: c.email,
            address: c.address,
            map_url: c.map_url,
            whatsapp: Some("+91 98765-43210".into()),
            created_at: Utc::now(),
            edited_at: Utc::now(),
        };
        assert_eq!(info.phone_href().as_deref(), Some("tel:+919876543210"));
        assert_eq!(
            info.whatsapp_href().as_deref(),
            Some("https://wa.me/919876543210")
        );
    }

    #[test]
    fn update_allows_clearing_email() {
        let update = ContactInfoUpdate {
            email: Some("".into()),
            ..Default::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(update.email.as_deref(), Some(""));
    }
}
