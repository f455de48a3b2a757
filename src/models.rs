use std::net::IpAddr;

use chrono::{DateTime, Duration, Utc};

/// How long a paste stays readable after it is created.
pub fn paste_lifetime() -> Duration {
    Duration::hours(24)
}

#[derive(Debug, Clone)]
pub struct Paste {
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Never set; there is no deletion path.
    pub deleted: bool,
    pub last_read: Option<DateTime<Utc>>,
    /// Audit only.
    #[allow(dead_code)]
    pub source_address: Option<IpAddr>,
}

impl Paste {
    pub fn new(text: String, source_address: Option<IpAddr>, now: DateTime<Utc>) -> Self {
        Paste {
            text,
            created_at: now,
            expires_at: now + paste_lifetime(),
            deleted: false,
            last_read: None,
            source_address,
        }
    }

    /// A paste can be read until the instant it expires, inclusive.
    pub fn is_accessible_at(&self, now: &DateTime<Utc>) -> bool {
        !self.deleted && *now <= self.expires_at
    }
}
