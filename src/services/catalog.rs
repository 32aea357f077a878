//! Catalog management service

use serde_json::{Map, Value};

use crate::{
    error::{AppError, AppResult},
    models::Book,
    repository::Repository,
    validation::{validate_for_create, validate_for_update},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check that the book store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }

    /// List every book in store order
    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.find_all().await
    }

    /// Get a book by ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        self.repository
            .books
            .find(isbn)
            .await?
            .ok_or_else(|| not_found(isbn))
    }

    /// Validate and insert a new book.
    /// A taken ISBN is a conflict, whether seen by the pre-check or by the store.
    pub async fn create(&self, payload: &Map<String, Value>) -> AppResult<Book> {
        let book = validate_for_create(payload).map_err(|violations| {
            tracing::debug!(violations = ?violations.messages(), "Catalog create: rejected payload");
            AppError::from(violations)
        })?;

        if self.repository.books.find(&book.isbn).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Book with isbn {} already exists",
                book.isbn
            )));
        }

        let created = self.repository.books.insert(&book).await?;
        tracing::info!(isbn = %created.isbn, "Catalog create: book created");
        Ok(created)
    }

    /// Merge a partial payload onto the stored book and persist it
    pub async fn update(&self, isbn: &str, payload: &Map<String, Value>) -> AppResult<Book> {
        let current = self.get_by_isbn(isbn).await?;

        let merged = validate_for_update(payload, &current).map_err(|violations| {
            tracing::debug!(isbn, violations = ?violations.messages(), "Catalog update: rejected payload");
            AppError::from(violations)
        })?;

        if merged == current {
            return Ok(current);
        }

        let updated = self.repository.books.replace(isbn, &merged).await?;
        tracing::info!(isbn, "Catalog update: book updated");
        Ok(updated)
    }

    /// Delete a book
    pub async fn remove(&self, isbn: &str) -> AppResult<()> {
        if !self.repository.books.delete(isbn).await? {
            return Err(not_found(isbn));
        }
        tracing::info!(isbn, "Catalog remove: book deleted");
        Ok(())
    }
}

fn not_found(isbn: &str) -> AppError {
    AppError::NotFound(format!("Book with isbn {} not found", isbn))
}
