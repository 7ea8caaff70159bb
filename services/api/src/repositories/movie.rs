//! Movie repository for database operations

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use super::parse_id;
use crate::models::{CascadeDelete, Movie, NewMovie};

/// Movie repository
#[derive(Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    /// Create a new movie repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new movie
    pub async fn create(&self, new_movie: &NewMovie) -> DatabaseResult<Movie> {
        let row = sqlx::query(
            r#"
            INSERT INTO movies (title, director, release_year, genre)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, director, release_year, genre, created_at, updated_at
            "#,
        )
        .bind(&new_movie.title)
        .bind(&new_movie.director)
        .bind(new_movie.release_year)
        .bind(&new_movie.genre)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(map_movie(row))
    }

    /// Get all movies
    pub async fn find_all(&self) -> DatabaseResult<Vec<Movie>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, director, release_year, genre, created_at, updated_at
            FROM movies
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.into_iter().map(map_movie).collect())
    }

    /// Find a movie by its identifier
    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Movie>> {
        let movie_id = parse_id(id)?;

        let row = sqlx::query(
            r#"
            SELECT id, title, director, release_year, genre, created_at, updated_at
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(map_movie))
    }

    /// Update a movie's details; returns `None` if it does not exist
    pub async fn update(&self, id: &str, update: &NewMovie) -> DatabaseResult<Option<Movie>> {
        let movie_id = parse_id(id)?;

        let row = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, director = $3, release_year = $4, genre = $5, updated_at = now()
            WHERE id = $1
            RETURNING id, title, director, release_year, genre, created_at, updated_at
            "#,
        )
        .bind(movie_id)
        .bind(&update.title)
        .bind(&update.director)
        .bind(update.release_year)
        .bind(&update.genre)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.map(map_movie))
    }

    /// Delete a movie together with every review that references it
    ///
    /// The movie row and its reviews are removed in two independent
    /// statements with no surrounding transaction; the review delete runs
    /// even when the movie row was already gone. A failure between the two
    /// statements leaves orphaned reviews behind.
    pub async fn delete_cascade(&self, id: &str) -> DatabaseResult<CascadeDelete> {
        let movie_id = parse_id(id)?;

        info!("Deleting movie {} and associated reviews", movie_id);

        let movie_result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(movie_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        let review_result = sqlx::query("DELETE FROM reviews WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(CascadeDelete {
            movie_deleted: movie_result.rows_affected() > 0,
            reviews_deleted: review_result.rows_affected(),
        })
    }
}

fn map_movie(row: PgRow) -> Movie {
    Movie {
        id: row.get("id"),
        title: row.get("title"),
        director: row.get("director"),
        release_year: row.get("release_year"),
        genre: row.get("genre"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
