//! Catalog service: book registration and availability

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookAvailability, CreateBook},
    repository::{books, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book with its available copies
    pub async fn list_books(&self) -> AppResult<Vec<BookAvailability>> {
        let mut conn = self.repository.acquire().await?;
        books::list_with_availability(&mut conn).await
    }

    /// Get a book with its available copies
    pub async fn get_book(&self, id: i64) -> AppResult<BookAvailability> {
        let mut conn = self.repository.acquire().await?;
        books::get_with_availability(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Register a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        let mut conn = self.repository.acquire().await?;
        match books::create(&mut conn, &book).await {
            Ok(created) => {
                tracing::info!(book_id = created.id, isbn = ?created.isbn, "Book added");
                Ok(created)
            }
            Err(e) => {
                if let AppError::Conflict(_) = e {
                    tracing::warn!(isbn = ?book.normalized_isbn(), "Rejected duplicate ISBN");
                }
                Err(e)
            }
        }
    }
}
