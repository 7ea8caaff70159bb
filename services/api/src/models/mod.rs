//! API service models

pub mod movie;
pub mod review;
pub mod user;

// Re-export for convenience
pub use movie::{CascadeDelete, Movie, MovieInput, NewMovie};
pub use review::{NewReview, Review, ReviewInput, ReviewUpdate};
pub use user::{LoginRequest, LoginResponse, NewUser, RegisterRequest, Role, User};
