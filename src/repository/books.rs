//! Books repository: registration and availability queries

use sqlx::SqliteConnection;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookAvailability, CreateBook},
};

/// Books joined with their outstanding loan count. The LEFT JOIN keeps books
/// that have never been borrowed, with `outstanding = 0`.
const AVAILABILITY_QUERY: &str = r#"
    SELECT b.id, b.title, b.author, b.isbn, b.published_year, b.quantity,
           COUNT(br.id) AS outstanding,
           b.quantity - COUNT(br.id) AS available_copies
    FROM books b
    LEFT JOIN borrow_records br ON br.book_id = b.id AND br.returned = 0
"#;

/// List all books with their availability
pub async fn list_with_availability(conn: &mut SqliteConnection) -> AppResult<Vec<BookAvailability>> {
    let books = sqlx::query_as::<_, BookAvailability>(&format!(
        "{AVAILABILITY_QUERY} GROUP BY b.id ORDER BY b.id"
    ))
    .fetch_all(&mut *conn)
    .await?;

    Ok(books)
}

/// Availability of a single book, `None` if the book does not exist
pub async fn get_with_availability(
    conn: &mut SqliteConnection,
    id: i64,
) -> AppResult<Option<BookAvailability>> {
    let book = sqlx::query_as::<_, BookAvailability>(&format!(
        "{AVAILABILITY_QUERY} WHERE b.id = ? GROUP BY b.id"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(book)
}

/// Insert a new book. A duplicate ISBN is rejected and nothing is written.
pub async fn create(conn: &mut SqliteConnection, book: &CreateBook) -> AppResult<Book> {
    sqlx::query_as::<_, Book>(
        r#"
        INSERT INTO books (title, author, isbn, published_year, quantity)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, title, author, isbn, published_year, quantity
        "#,
    )
    .bind(book.title.trim())
    .bind(book.author.trim())
    .bind(book.normalized_isbn())
    .bind(book.published_year)
    .bind(book.quantity_or_default())
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| AppError::on_unique_violation(e, "Book with this ISBN already exists"))
}
