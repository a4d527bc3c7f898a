use crate::domain::errors::DomainResult;
use crate::shared::utils::{format_timestamp, parse_timestamp, token_hint};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Long-lived bearer credential owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToken {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub expires_at: Option<String>,
    pub created_at: String,
}

impl ApiToken {
    pub fn new(
        user_id: String,
        name: String,
        token: String,
        expires_in_days: Option<i64>,
        now: OffsetDateTime,
    ) -> DomainResult<Self> {
        let expires_at = match expires_in_days {
            Some(days) => Some(format_timestamp(now + time::Duration::days(days))?),
            None => None,
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name,
            token,
            expires_at,
            created_at: format_timestamp(now)?,
        })
    }
}

/// What the token store returns for a bearer token lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub user_id: String,
    pub expires_at: Option<String>,
}

impl TokenRecord {
    /// No expiry means the token never expires. An unreadable expiry counts as expired.
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        match &self.expires_at {
            None => true,
            Some(raw) => parse_timestamp(raw).map_or(false, |expires_at| expires_at > now),
        }
    }
}

// DTOs for API requests/responses

#[derive(Debug, Clone, Deserialize)]
pub struct CreateApiTokenRequest {
    /// Human-readable label (1-100 characters)
    pub name: String,
    /// Lifetime in days; omitted means the token never expires
    #[serde(default)]
    pub expires_in_days: Option<i64>,
}

/// Returned once at issuance; the only response carrying the full token
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateApiTokenResponse {
    pub id: String,
    pub name: String,
    pub token: String,
    pub expires_at: Option<String>,
    pub created_at: String,
}

impl From<&ApiToken> for CreateApiTokenResponse {
    fn from(token: &ApiToken) -> Self {
        Self {
            id: token.id.clone(),
            name: token.name.clone(),
            token: token.token.clone(),
            expires_at: token.expires_at.clone(),
            created_at: token.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiTokenListItem {
    pub id: String,
    pub name: String,
    /// Last four characters of the token
    pub token_hint: String,
    pub expires_at: Option<String>,
    pub created_at: String,
}

impl From<&ApiToken> for ApiTokenListItem {
    fn from(token: &ApiToken) -> Self {
        Self {
            id: token.id.clone(),
            name: token.name.clone(),
            token_hint: token_hint(&token.token),
            expires_at: token.expires_at.clone(),
            created_at: token.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiTokenListResponse {
    pub tokens: Vec<ApiTokenListItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn record(expires_at: Option<&str>) -> TokenRecord {
        TokenRecord {
            user_id: "123".to_string(),
            expires_at: expires_at.map(str::to_string),
        }
    }

    #[test]
    fn test_token_without_expiry_is_valid() {
        assert!(record(None).is_valid_at(datetime!(2099-01-01 0:00 UTC)));
    }

    #[test]
    fn test_token_expiry_must_be_strictly_after_now() {
        let now = datetime!(2024-05-01 08:00 UTC);
        assert!(record(Some("2024-05-01T08:00:10Z")).is_valid_at(now));
        assert!(!record(Some("2024-05-01T08:00:00Z")).is_valid_at(now));
        assert!(!record(Some("2024-05-01T07:59:50Z")).is_valid_at(now));
    }

    #[test]
    fn test_unreadable_expiry_is_invalid() {
        let now = datetime!(2024-05-01 08:00 UTC);
        assert!(!record(Some("")).is_valid_at(now));
        assert!(!record(Some("tomorrow")).is_valid_at(now));
    }

    #[test]
    fn test_new_token_expiry() {
        let now = datetime!(2024-05-01 08:00 UTC);
        let token = ApiToken::new(
            "user-1".to_string(),
            "ci".to_string(),
            "abcd1234".to_string(),
            Some(30),
            now,
        )
        .unwrap();
        assert_eq!(token.expires_at.as_deref(), Some("2024-05-31T08:00:00Z"));

        let forever = ApiToken::new(
            "user-1".to_string(),
            "ci".to_string(),
            "abcd1234".to_string(),
            None,
            now,
        )
        .unwrap();
        assert_eq!(forever.expires_at, None);
    }

    #[test]
    fn test_list_item_redacts_token() {
        let token = ApiToken::new(
            "user-1".to_string(),
            "ci".to_string(),
            "abcdef0123456789".to_string(),
            None,
            datetime!(2024-05-01 08:00 UTC),
        )
        .unwrap();
        let item = ApiTokenListItem::from(&token);
        assert_eq!(item.token_hint, "6789");

        let json = serde_json::to_value(&token).unwrap();
        assert!(json.get("token").is_none());
    }
}
