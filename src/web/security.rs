use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// Sliding-window limits for the public write endpoints, keyed by
/// `"<action>:<client ip>"`.
pub mod limits {
    use std::time::Duration;

    pub const LOGIN: (usize, Duration) = (5, Duration::from_secs(300));
    pub const SUBSCRIBE: (usize, Duration) = (5, Duration::from_secs(3600));
    pub const MESSAGE: (usize, Duration) = (5, Duration::from_secs(3600));
    pub const PIN_REQUEST: (usize, Duration) = (3, Duration::from_secs(900));
    pub const PIN_VERIFY: (usize, Duration) = (10, Duration::from_secs(900));
}

/// Hits recorded for one key, with the window they were counted against.
struct Hits {
    window: Duration,
    times: Vec<SystemTime>,
}

impl Hits {
    fn prune(&mut self, now: SystemTime) {
        let window = self.window;
        self.times
            .retain(|&time| now.duration_since(time).unwrap_or_default() < window);
    }
}

/// Simple in-memory rate limiter
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Hits>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true if allowed, false if rate limit exceeded
    pub fn check_rate_limit(
        &self,
        key: &str,
        max_requests: usize,
        window: Duration,
    ) -> bool {
        let now = SystemTime::now();
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Expire every key, not only this one, so idle clients drop out
        requests.retain(|_, hits| {
            hits.prune(now);
            !hits.times.is_empty()
        });

        let entry = requests.entry(key.to_string()).or_insert_with(|| Hits {
            window,
            times: Vec::new(),
        });
        entry.window = window;

        if entry.times.len() >= max_requests {
            return false;
        }

        entry.times.push(now);
        true
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn check(
        &self,
        action: &str,
        client: &str,
        limit: (usize, Duration),
    ) -> bool {
        let key = format!("{}:{}", action, client);
        self.check_rate_limit(&key, limit.0, limit.1)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Strength rules for the bootstrap admin password.
pub struct PasswordValidator;

impl PasswordValidator {
    const MIN_LENGTH: usize = 12;

    pub fn validate(password: &str) -> Result<(), String> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(format!(
                "Password must be at least {} characters",
                Self::MIN_LENGTH
            ));
        }

        let classes = [
            password.chars().any(|c| c.is_uppercase()),
            password.chars().any(|c| c.is_lowercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_alphanumeric()),
        ];

        if classes.iter().filter(|met| **met).count() < 3 {
            return Err("Password must contain at least 3 of: uppercase, \
                        lowercase, digit, special character"
                .to_string());
        }

        Ok(())
    }
}

/// Generic error message for security
pub fn generic_error_message(context: &str) -> String {
    format!(
        "An error occurred while processing your {}. Please try again.",
        context
    )
}
