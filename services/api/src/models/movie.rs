//! Movie model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Movie entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub director: String,
    pub release_year: i32,
    pub genre: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Movie create/update payload
///
/// All four fields are required; they arrive as options so an absent field
/// is reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub title: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
}

/// Validated movie payload
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub director: String,
    pub release_year: i32,
    pub genre: String,
}

/// Result of a movie deletion and its review cascade
#[derive(Debug, Clone, Copy)]
pub struct CascadeDelete {
    pub movie_deleted: bool,
    pub reviews_deleted: u64,
}
