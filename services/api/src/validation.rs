//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{LoginRequest, MovieInput, NewMovie, RegisterRequest, ReviewInput, ReviewUpdate};

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a registration payload; all three fields are required
pub fn validate_registration(req: &RegisterRequest) -> Result<(String, String, String), String> {
    let (Some(username), Some(email), Some(password)) = (
        required(req.username.as_deref()),
        required(req.email.as_deref()),
        required(req.password.as_deref()),
    ) else {
        return Err("All fields are required".to_string());
    };

    validate_email(email)?;

    Ok((
        username.to_string(),
        email.to_string(),
        password.to_string(),
    ))
}

/// Validate a login payload
pub fn validate_login(req: &LoginRequest) -> Result<(String, String), String> {
    let (Some(email), Some(password)) = (
        required(req.email.as_deref()),
        required(req.password.as_deref()),
    ) else {
        return Err("All fields are required".to_string());
    };

    Ok((email.to_string(), password.to_string()))
}

/// Validate a movie payload; all four fields are required
pub fn validate_movie(input: &MovieInput) -> Result<NewMovie, String> {
    let (Some(title), Some(director), Some(release_year), Some(genre)) = (
        required(input.title.as_deref()),
        required(input.director.as_deref()),
        input.release_year,
        required(input.genre.as_deref()),
    ) else {
        return Err("All fields are required".to_string());
    };

    Ok(NewMovie {
        title: title.to_string(),
        director: director.to_string(),
        release_year,
        genre: genre.to_string(),
    })
}

/// Validate a review payload; all four fields are required
///
/// The reference identifiers stay raw here; the store decides whether they
/// are well-formed.
pub fn validate_review(input: &ReviewInput) -> Result<(String, String, i32, String), String> {
    let (Some(movie_id), Some(user_id), Some(rating), Some(comment)) = (
        required(input.movie_id.as_deref()),
        required(input.user_id.as_deref()),
        input.rating,
        required(input.comment.as_deref()),
    ) else {
        return Err("All fields are required".to_string());
    };

    Ok((
        movie_id.to_string(),
        user_id.to_string(),
        rating,
        comment.to_string(),
    ))
}

/// Validate a review update payload
pub fn validate_review_update(input: &ReviewUpdate) -> Result<(i32, String), String> {
    let (Some(rating), Some(comment)) = (input.rating, required(input.comment.as_deref())) else {
        return Err("Rating and comment are required".to_string());
    };

    Ok((rating, comment.to_string()))
}

fn required(field: Option<&str>) -> Option<&str> {
    match field {
        Some(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user.name+tag@sub.example.co").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_registration() {
        let req = RegisterRequest {
            username: Some("alice".to_string()),
            email: Some("alice@example.com".to_string()),
            password: Some("hunter22".to_string()),
        };
        assert!(validate_registration(&req).is_ok());

        let req = RegisterRequest {
            username: Some("alice".to_string()),
            email: None,
            password: Some("hunter22".to_string()),
        };
        assert_eq!(
            validate_registration(&req).unwrap_err(),
            "All fields are required"
        );

        let req = RegisterRequest {
            username: Some("alice".to_string()),
            email: Some("".to_string()),
            password: Some("hunter22".to_string()),
        };
        assert_eq!(
            validate_registration(&req).unwrap_err(),
            "All fields are required"
        );

        let req = RegisterRequest {
            username: Some("alice".to_string()),
            email: Some("bad-email".to_string()),
            password: Some("hunter22".to_string()),
        };
        assert_eq!(
            validate_registration(&req).unwrap_err(),
            "Invalid email format"
        );
    }

    #[test]
    fn test_validate_movie_requires_all_fields() {
        let input = MovieInput {
            title: Some("A".to_string()),
            director: Some("B".to_string()),
            release_year: Some(2000),
            genre: Some("Drama".to_string()),
        };
        let movie = validate_movie(&input).unwrap();
        assert_eq!(movie.title, "A");
        assert_eq!(movie.director, "B");
        assert_eq!(movie.release_year, 2000);
        assert_eq!(movie.genre, "Drama");

        let input = MovieInput {
            title: Some("A".to_string()),
            director: Some("B".to_string()),
            release_year: None,
            genre: Some("Drama".to_string()),
        };
        assert_eq!(validate_movie(&input).unwrap_err(), "All fields are required");
    }

    #[test]
    fn test_validate_review_requires_all_fields() {
        let input = ReviewInput {
            movie_id: Some("ccccaaaa-1111-2222-3333-444455556666".to_string()),
            user_id: Some("ddddaaaa-1111-2222-3333-444455556666".to_string()),
            rating: Some(5),
            comment: Some("great".to_string()),
        };
        assert!(validate_review(&input).is_ok());

        for missing in ["movie_id", "user_id", "rating", "comment"] {
            let mut input = ReviewInput {
                movie_id: Some("ccccaaaa-1111-2222-3333-444455556666".to_string()),
                user_id: Some("ddddaaaa-1111-2222-3333-444455556666".to_string()),
                rating: Some(5),
                comment: Some("great".to_string()),
            };
            match missing {
                "movie_id" => input.movie_id = None,
                "user_id" => input.user_id = None,
                "rating" => input.rating = None,
                _ => input.comment = None,
            }
            assert_eq!(
                validate_review(&input).unwrap_err(),
                "All fields are required"
            );
        }
    }

    #[test]
    fn test_validate_review_update() {
        let input = ReviewUpdate {
            rating: Some(3),
            comment: Some("okay".to_string()),
        };
        assert_eq!(
            validate_review_update(&input).unwrap(),
            (3, "okay".to_string())
        );

        let input = ReviewUpdate {
            rating: None,
            comment: Some("okay".to_string()),
        };
        assert_eq!(
            validate_review_update(&input).unwrap_err(),
            "Rating and comment are required"
        );
    }
}
