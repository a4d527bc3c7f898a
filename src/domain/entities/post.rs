use crate::domain::errors::DomainResult;
use crate::shared::utils::format_timestamp;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlisted,
    Private,
    Protected,
}

impl Visibility {
    /// Rendered pages are only published for posts reachable without an account
    pub fn is_allowed_for_webpage(&self) -> bool {
        matches!(self, Visibility::Public | Visibility::Unlisted)
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Unlisted => write!(f, "unlisted"),
            Visibility::Private => write!(f, "private"),
            Visibility::Protected => write!(f, "protected"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "unlisted" => Ok(Visibility::Unlisted),
            "private" => Ok(Visibility::Private),
            "protected" => Ok(Visibility::Protected),
            _ => Err(format!("Invalid visibility: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub visibility: Visibility,
    pub author_id: String,
    pub created_at: String,
}

impl Post {
    pub fn new(
        title: String,
        description: Option<String>,
        visibility: Visibility,
        author_id: String,
    ) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            visibility,
            author_id,
            created_at: format_timestamp(OffsetDateTime::now_utc())?,
        })
    }
}

/// A file of a post. `html` holds the pre-rendered form of `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    pub id: String,
    pub post_id: String,
    pub title: String,
    pub content: Vec<u8>,
    pub html: Vec<u8>,
    pub created_at: String,
}

impl File {
    pub fn new(post_id: String, title: String, content: Vec<u8>, html: Vec<u8>) -> DomainResult<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            post_id,
            title,
            content,
            html,
            created_at: format_timestamp(OffsetDateTime::now_utc())?,
        })
    }
}

/// A file together with the visibility of the post it belongs to
#[derive(Debug, Clone)]
pub struct PostFile {
    pub file: File,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFileQuery {
    #[serde(default)]
    pub download: Option<String>,
}

impl RawFileQuery {
    pub fn is_download(&self) -> bool {
        self.download.as_deref() == Some("true")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawFileResponse {
    pub data: String,
}
