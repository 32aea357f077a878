//! Book model and HTTP envelopes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A catalog record. Every field is populated and valid once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// ISBN, primary key; immutable after creation
    #[schema(example = "1524744794")]
    pub isbn: String,
    /// Absolute URL of the book's Amazon page
    #[schema(example = "https://www.amazon.com/dp/1524744794")]
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    /// Page count (>= 1)
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    /// Publication year (>= 1)
    pub year: i32,
}

/// Single book response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

/// Book list response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
