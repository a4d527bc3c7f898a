use crate::domain::errors::{DomainError, DomainResult};
use time::{format_description::well_known::Rfc3339, OffsetDateTime, UtcOffset};

/// Format a timestamp as RFC 3339 in UTC with whole-second precision.
///
/// Stored timestamps are compared as strings in SQL, so every value
/// written by the application must share this exact shape.
pub fn format_timestamp(at: OffsetDateTime) -> DomainResult<String> {
    let at = at
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|e| DomainError::Internal(format!("Invalid timestamp: {}", e)))?;

    at.format(&Rfc3339)
        .map_err(|e| DomainError::Internal(format!("Failed to format timestamp: {}", e)))
}

/// Parse an RFC 3339 timestamp, returning None when it is unreadable
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339).ok()
}
