//! API service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tracing::{error, info};

use common::error::DatabaseError;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, auth_middleware},
    models::{
        LoginRequest, LoginResponse, MovieInput, NewReview, NewUser, RegisterRequest, ReviewInput,
        ReviewUpdate,
    },
    password,
    repositories::parse_id,
    state::AppState,
    validation,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/movies", post(create_movie))
        .route("/movies", get(get_movies))
        .route("/movies/:id", get(get_movie))
        .route("/movies/:id", put(update_movie))
        .route("/movies/:id", delete(delete_movie))
        .route("/movies/:id/reviews", get(get_movie_reviews))
        .route("/reviews", post(create_review))
        .route("/reviews", get(get_reviews))
        .route("/reviews/:id", get(get_review))
        .route("/reviews/:id", put(update_review))
        .route("/reviews/:id", delete(delete_review))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(json!({
        "status": if database { "ok" } else { "degraded" },
        "service": "movie-reviews-api"
    }))
}

/// Register a new user account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let (username, email, plaintext) =
        validation::validate_registration(&payload).map_err(ApiError::Validation)?;

    let password_hash = password::hash(plaintext).await.map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::InternalServerError
    })?;

    let new_user = NewUser {
        username,
        email,
        password_hash,
    };

    state
        .user_repository
        .create(&new_user)
        .await
        .map_err(|e| match e {
            DatabaseError::Conflict(_) => {
                ApiError::Validation("Error registering user".to_string())
            }
            e => {
                error!("Failed to create user: {}", e);
                ApiError::Database(e)
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered" })),
    ))
}

/// Log in with email and password, receiving a session token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (email, plaintext) = validation::validate_login(&payload).map_err(ApiError::Validation)?;

    let user = state
        .user_repository
        .find_by_email(&email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Database(e)
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let valid = password::verify(plaintext, user.password_hash.clone())
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt_service.issue_token(&user).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(LoginResponse {
        message: "Success".to_string(),
        token,
    }))
}

/// Create a new movie
pub async fn create_movie(
    State(state): State<AppState>,
    Json(payload): Json<MovieInput>,
) -> ApiResult<impl IntoResponse> {
    let new_movie = validation::validate_movie(&payload).map_err(ApiError::Validation)?;

    let movie = state
        .movie_repository
        .create(&new_movie)
        .await
        .map_err(|e| {
            error!("Failed to create movie: {}", e);
            ApiError::from(e)
        })?;

    Ok((StatusCode::CREATED, Json(movie)))
}

/// Get all movies
pub async fn get_movies(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let movies = state.movie_repository.find_all().await.map_err(|e| {
        error!("Failed to get movies: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(movies))
}

/// Get a movie by ID
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let movie = state
        .movie_repository
        .find_by_id(&id)
        .await
        .map_err(|e| match e {
            DatabaseError::InvalidIdentifier(_) => {
                ApiError::InvalidId("Invalid movie ID".to_string())
            }
            e => {
                error!("Failed to get movie: {}", e);
                ApiError::Database(e)
            }
        })?
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

    Ok(Json(movie))
}

/// Update a movie's details
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MovieInput>,
) -> ApiResult<impl IntoResponse> {
    let update = validation::validate_movie(&payload).map_err(ApiError::Validation)?;

    let movie = state
        .movie_repository
        .update(&id, &update)
        .await
        .map_err(|e| match e {
            DatabaseError::InvalidIdentifier(_) => {
                ApiError::InvalidId("Invalid movie ID".to_string())
            }
            e => {
                error!("Failed to update movie: {}", e);
                ApiError::Database(e)
            }
        })?
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

    Ok(Json(movie))
}

/// Delete a movie together with all reviews that reference it
///
/// The review cascade runs even when the movie row is already gone, so a
/// not-found movie still reports 404 after the cascade attempt.
pub async fn delete_movie(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    info!(
        "User {} ({}) requested deletion of movie {}",
        auth_user.id,
        auth_user.role.as_str(),
        id
    );

    let result = state
        .movie_repository
        .delete_cascade(&id)
        .await
        .map_err(|e| match e {
            DatabaseError::InvalidIdentifier(_) => {
                ApiError::InvalidId("Invalid movie ID".to_string())
            }
            e => {
                error!("Failed to delete movie: {}", e);
                ApiError::Database(e)
            }
        })?;

    if !result.movie_deleted {
        return Err(ApiError::NotFound("Movie not found".to_string()));
    }

    info!(
        "Deleted movie {} and {} associated reviews",
        id, result.reviews_deleted
    );

    Ok(Json(json!({
        "message": "Movie and associated reviews deleted successfully"
    })))
}

/// Get all reviews for a specific movie
pub async fn get_movie_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let reviews = state
        .review_repository
        .find_by_movie(&id)
        .await
        .map_err(|e| match e {
            DatabaseError::InvalidIdentifier(_) => {
                ApiError::InvalidId("Invalid movie ID".to_string())
            }
            e => {
                error!("Failed to get reviews: {}", e);
                ApiError::Database(e)
            }
        })?;

    if reviews.is_empty() {
        return Err(ApiError::NotFound(
            "No reviews found for this movie".to_string(),
        ));
    }

    Ok(Json(reviews))
}

/// Create a new review
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<ReviewInput>,
) -> ApiResult<impl IntoResponse> {
    let (movie_id, user_id, rating, comment) =
        validation::validate_review(&payload).map_err(ApiError::Validation)?;

    let movie_id =
        parse_id(&movie_id).map_err(|_| ApiError::InvalidId("Invalid movie ID".to_string()))?;
    let user_id =
        parse_id(&user_id).map_err(|_| ApiError::InvalidId("Invalid user ID".to_string()))?;

    let review = state
        .review_repository
        .create(&NewReview {
            movie_id,
            user_id,
            rating,
            comment,
        })
        .await
        .map_err(|e| {
            error!("Failed to create review: {}", e);
            ApiError::from(e)
        })?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// Get all reviews
pub async fn get_reviews(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let reviews = state.review_repository.find_all().await.map_err(|e| {
        error!("Failed to get reviews: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(reviews))
}

/// Get a review by ID
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let review = state
        .review_repository
        .find_by_id(&id)
        .await
        .map_err(|e| match e {
            DatabaseError::InvalidIdentifier(_) => {
                ApiError::InvalidId("Invalid review ID".to_string())
            }
            e => {
                error!("Failed to get review: {}", e);
                ApiError::Database(e)
            }
        })?
        .ok_or_else(|| ApiError::NotFound("Review not found".to_string()))?;

    Ok(Json(review))
}

/// Update a review's rating and comment
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewUpdate>,
) -> ApiResult<impl IntoResponse> {
    let (rating, comment) =
        validation::validate_review_update(&payload).map_err(ApiError::Validation)?;

    let review = state
        .review_repository
        .update(&id, rating, &comment)
        .await
        .map_err(|e| match e {
            DatabaseError::InvalidIdentifier(_) => {
                ApiError::InvalidId("Invalid review ID".to_string())
            }
            e => {
                error!("Failed to update review: {}", e);
                ApiError::Database(e)
            }
        })?
        .ok_or_else(|| ApiError::NotFound("Review not found".to_string()))?;

    Ok(Json(review))
}

/// Delete a review by ID
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state
        .review_repository
        .delete(&id)
        .await
        .map_err(|e| match e {
            DatabaseError::InvalidIdentifier(_) => {
                ApiError::InvalidId("Invalid review ID".to_string())
            }
            e => {
                error!("Failed to delete review: {}", e);
                ApiError::Database(e)
            }
        })?;

    if !deleted {
        return Err(ApiError::NotFound("Review not found".to_string()));
    }

    Ok(Json(json!({ "message": "Review deleted successfully" })))
}
