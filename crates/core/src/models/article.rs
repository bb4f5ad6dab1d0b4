use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CarportError, CarportResult};
use crate::models::catalog::Tag;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub photo_url: Option<String>,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArticleRequest {
    pub category_id: Option<i64>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateArticleRequest {
    pub fn validate(&self) -> CarportResult<()> {
        if self.title.trim().is_empty() {
            return Err(CarportError::validation("title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(CarportError::validation("content is required"));
        }
        Ok(())
    }
}

/// Partial edit. Empty strings leave a field untouched; a non-empty tag list
/// replaces the article's tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateArticleRequest {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Publish date after a change of the published flag.
pub fn publish_date_for(
    published: bool,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (published, current) {
        (true, Some(existing)) => Some(existing),
        (true, None) => Some(now),
        (false, _) => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleQuery {
    pub published: Option<bool>,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateArticleStatusRequest {
    pub published: bool,
}
