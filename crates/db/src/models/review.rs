//! Patient testimonial/review entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use carelink_core::types::{DbId, Timestamp};

/// A review row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub name: String,
    pub role: Option<String>,
    pub image: Option<String>,
    pub rating: i32,
    pub review_text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a review.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    #[validate(length(min = 1))]
    pub name: String,
    pub role: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(min = 1))]
    pub review_text: String,
}

/// DTO for updating a review. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReview {
    pub name: Option<String>,
    pub role: Option<String>,
    pub image: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    pub review_text: Option<String>,
}
