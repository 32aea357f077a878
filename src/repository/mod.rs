//! Repository layer for book storage

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Book};

pub use books::PgBookStore;
pub use memory::MemoryBookStore;

/// Storage capability consumed by the catalog service.
///
/// Implementations enforce `isbn` uniqueness themselves: `insert` returns
/// `AppError::Conflict` for a taken key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;

    async fn find(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// All books, in insertion order
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn insert(&self, book: &Book) -> AppResult<Book>;

    /// Overwrite the record stored under `isbn`
    async fn replace(&self, isbn: &str, book: &Book) -> AppResult<Book>;

    /// Returns false when nothing was stored under `isbn`
    async fn delete(&self, isbn: &str) -> AppResult<bool>;
}

/// Main repository struct holding the book store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by PostgreSQL
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_store(Arc::new(PgBookStore::new(pool)))
    }

    /// Create a repository backed by a process-local store
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryBookStore::new()))
    }

    pub fn with_store(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
