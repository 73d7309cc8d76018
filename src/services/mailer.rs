use std::time::Duration;

use log::info;
use serde::Serialize;

use crate::common::MailError;
use crate::config::MailConfig;

/// Upper bound on one provider call, connect included.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Outbound mail. Without a provider configured, messages are only logged.
#[derive(Clone)]
pub enum Mailer {
    Log,
    Http {
        client: reqwest::Client,
        api_url: String,
        api_key: Option<String>,
        from: String,
    },
}

#[derive(Serialize)]
struct ProviderPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

impl Mailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let Some(api_url) = &config.api_url else {
            return Ok(Self::Log);
        };

        let client = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .connect_timeout(PROVIDER_TIMEOUT)
            .build()?;

        Ok(Self::Http {
            client,
            api_url: api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }

    pub async fn send(&self, email: &Email) -> Result<(), MailError> {
        match self {
            Self::Log => {
                info!(
                    "Mail provider not configured; would send '{}' to {}",
                    email.subject, email.to
                );
                Ok(())
            }
            Self::Http {
                client,
                api_url,
                api_key,
                from,
            } => {
                let payload = ProviderPayload {
                    from: from.as_str(),
                    to: [email.to.as_str()],
                    subject: email.subject.as_str(),
                    text: email.text.as_str(),
                };

                let mut request = client.post(api_url).json(&payload);
                if let Some(key) = api_key {
                    request = request.bearer_auth(key);
                }

                let response = request.send().await?;
                if !response.status().is_success() {
                    return Err(MailError::Rejected(response.status().as_u16()));
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Log => f.write_str("Mailer::Log"),
            Self::Http { api_url, .. } => write!(f, "Mailer::Http({api_url})"),
        }
    }
}
