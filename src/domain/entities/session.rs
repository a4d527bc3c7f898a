use crate::domain::errors::DomainResult;
use crate::shared::utils::{format_timestamp, parse_timestamp};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub expires_at: String,
    pub created_at: String,
}

impl Session {
    pub fn new(
        user_id: String,
        token: String,
        duration_hours: i64,
        now: OffsetDateTime,
    ) -> DomainResult<Self> {
        let expires_at = now + time::Duration::hours(duration_hours);

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            token,
            expires_at: format_timestamp(expires_at)?,
            created_at: format_timestamp(now)?,
        })
    }

    /// A session is live only while its expiry is strictly after `now`
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        match parse_timestamp(&self.expires_at) {
            Some(expires_at) => expires_at <= now,
            None => true,
        }
    }
}
