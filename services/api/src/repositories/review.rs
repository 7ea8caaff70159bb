//! Review repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use super::parse_id;
use crate::models::{NewReview, Review};

/// Review repository
#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    /// Create a new review repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new review
    ///
    /// The referenced movie and user are not checked for existence here.
    pub async fn create(&self, new_review: &NewReview) -> DatabaseResult<Review> {
        let row = sqlx::query(
            r#"
            INSERT INTO reviews (movie_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, movie_id, user_id, rating, comment, created_at, updated_at
            "#,
        )
        .bind(new_review.movie_id)
        .bind(new_review.user_id)
        .bind(new_review.rating)
        .bind(&new_review.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(map_review(row))
    }

    /// Get all reviews
    pub async fn find_all(&self) -> DatabaseResult<Vec<Review>> {
        let rows = sqlx::query(
            r#"
            SELECT id, movie_id, user_id, rating, comment, created_at, updated_at
            FROM reviews
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.into_iter().map(map_review).collect())
    }

    /// Find a review by its identifier
    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Review>> {
        let review_id = parse_id(id)?;

        let row = sqlx::query(
            r#"
            SELECT id, movie_id, user_id, rating, comment, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(map_review))
    }

    /// Find all reviews that reference a movie
    pub async fn find_by_movie(&self, movie_id: &str) -> DatabaseResult<Vec<Review>> {
        let movie_id = parse_id(movie_id)?;

        let rows = sqlx::query(
            r#"
            SELECT id, movie_id, user_id, rating, comment, created_at, updated_at
            FROM reviews
            WHERE movie_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.into_iter().map(map_review).collect())
    }

    /// Update a review's rating and comment; returns `None` if it does not exist
    pub async fn update(
        &self,
        id: &str,
        rating: i32,
        comment: &str,
    ) -> DatabaseResult<Option<Review>> {
        let review_id = parse_id(id)?;

        let row = sqlx::query(
            r#"
            UPDATE reviews
            SET rating = $2, comment = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, movie_id, user_id, rating, comment, created_at, updated_at
            "#,
        )
        .bind(review_id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(map_review))
    }

    /// Delete a review by its identifier; returns whether a row was removed
    pub async fn delete(&self, id: &str) -> DatabaseResult<bool> {
        let review_id = parse_id(id)?;

        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_review(row: PgRow) -> Review {
    Review {
        id: row.get("id"),
        movie_id: row.get("movie_id"),
        user_id: row.get("user_id"),
        rating: row.get("rating"),
        comment: row.get("comment"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
