//! Review model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review entity
///
/// References its movie and author by identifier. A review must not
/// outlive its movie; the movie deletion cascade enforces that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review creation payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    pub movie_id: Option<String>,
    pub user_id: Option<String>,
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Validated review payload
#[derive(Debug, Clone)]
pub struct NewReview {
    pub movie_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

/// Review update payload; only rating and comment may change
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}
