//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// ISBN, unique across books when present
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    /// Number of copies owned
    pub quantity: i64,
}

/// Book with its derived availability
///
/// `available_copies` is `quantity - outstanding`, where `outstanding` counts
/// only borrow records that have not been returned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookAvailability {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub quantity: i64,
    /// Copies currently on loan
    pub outstanding: i64,
    /// Copies on the shelf
    pub available_copies: i64,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    /// Copies owned (default: 1)
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i64>,
}

impl CreateBook {
    /// ISBN with surrounding whitespace removed; blank values count as absent
    pub fn normalized_isbn(&self) -> Option<String> {
        self.isbn
            .as_deref()
            .map(str::trim)
            .filter(|isbn| !isbn.is_empty())
            .map(str::to_string)
    }

    pub fn quantity_or_default(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }
}
