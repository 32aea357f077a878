//! Process-local book store.
//!
//! Keeps books in insertion order. Used when `storage.backend = "memory"` and
//! by the test suites.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::Book,
};

#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<IndexMap<String, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn find(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.get(isbn).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn insert(&self, book: &Book) -> AppResult<Book> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.isbn) {
            return Err(AppError::Conflict(format!(
                "Book with isbn {} already exists",
                book.isbn
            )));
        }
        books.insert(book.isbn.clone(), book.clone());
        Ok(book.clone())
    }

    async fn replace(&self, isbn: &str, book: &Book) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let slot = books
            .get_mut(isbn)
            .ok_or_else(|| AppError::NotFound(format!("Book with isbn {} not found", isbn)))?;
        *slot = Book {
            isbn: isbn.to_string(),
            ..book.clone()
        };
        Ok(slot.clone())
    }

    async fn delete(&self, isbn: &str) -> AppResult<bool> {
        Ok(self.books.write().await.shift_remove(isbn).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str, title: &str) -> Book {
        Book {
            isbn: isbn.to_string(),
            amazon_url: "http://a.co/eobPtX2".to_string(),
            author: "Matthew Lane".to_string(),
            language: "english".to_string(),
            pages: 264,
            publisher: "Princeton University Press".to_string(),
            title: title.to_string(),
            year: 2017,
        }
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = MemoryBookStore::new();
        assert!(store.find_all().await.unwrap().is_empty());

        for isbn in ["9", "1", "5"] {
            store.insert(&book(isbn, "t")).await.unwrap();
        }
        let isbns: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.isbn)
            .collect();
        assert_eq!(isbns, ["9", "1", "5"]);

        store.delete("1").await.unwrap();
        let isbns: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.isbn)
            .collect();
        assert_eq!(isbns, ["9", "5"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_isbn() {
        let store = MemoryBookStore::new();
        store.insert(&book("0691161518", "Power-Up")).await.unwrap();

        let err = store.insert(&book("0691161518", "Other")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(
            store.find("0691161518").await.unwrap().unwrap().title,
            "Power-Up"
        );
    }

    #[tokio::test]
    async fn test_replace_and_delete() {
        let store = MemoryBookStore::new();
        store.insert(&book("0691161518", "Power-Up")).await.unwrap();

        let updated = store
            .replace("0691161518", &book("0691161518", "Power-Down"))
            .await
            .unwrap();
        assert_eq!(updated.title, "Power-Down");
        assert_eq!(store.find("0691161518").await.unwrap(), Some(updated));

        let err = store.replace("missing", &book("missing", "x")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert!(store.delete("0691161518").await.unwrap());
        assert!(!store.delete("0691161518").await.unwrap());
        assert_eq!(store.find("0691161518").await.unwrap(), None);
    }
}
