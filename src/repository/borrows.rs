//! Borrow records repository

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::{
    error::AppResult,
    models::borrow::{BorrowRecord, BorrowingDetails},
};

const RECORD_COLUMNS: &str =
    "id, book_id, member_id, borrow_date, return_date, returned, returned_date";

/// Insert an outstanding borrow record if the book exists, the member exists
/// and at least one copy is on the shelf.
///
/// The availability check and the insert are a single statement, so two
/// borrows racing for the last copy cannot both succeed. Returns `None` when
/// nothing was inserted.
pub async fn insert_if_available(
    conn: &mut SqliteConnection,
    book_id: i64,
    member_id: i64,
    borrow_date: NaiveDate,
    return_date: NaiveDate,
) -> AppResult<Option<BorrowRecord>> {
    let record = sqlx::query_as::<_, BorrowRecord>(&format!(
        r#"
        INSERT INTO borrow_records (book_id, member_id, borrow_date, return_date, returned)
        SELECT b.id, ?2, ?3, ?4, 0
        FROM books b
        WHERE b.id = ?1
          AND EXISTS (SELECT 1 FROM members m WHERE m.id = ?2)
          AND b.quantity > (
              SELECT COUNT(*) FROM borrow_records br
              WHERE br.book_id = b.id AND br.returned = 0
          )
        RETURNING {RECORD_COLUMNS}
        "#
    ))
    .bind(book_id)
    .bind(member_id)
    .bind(borrow_date)
    .bind(return_date)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(record)
}

/// Get borrow record by ID
pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<BorrowRecord>> {
    let record = sqlx::query_as::<_, BorrowRecord>(&format!(
        "SELECT {RECORD_COLUMNS} FROM borrow_records WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(record)
}

/// Flip an outstanding record to returned, stamping the actual return date.
/// Returns false when no outstanding record with this id exists.
pub async fn mark_returned(
    conn: &mut SqliteConnection,
    id: i64,
    returned_date: NaiveDate,
) -> AppResult<bool> {
    let result = sqlx::query(
        "UPDATE borrow_records SET returned = 1, returned_date = ? WHERE id = ? AND returned = 0",
    )
    .bind(returned_date)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

const OUTSTANDING_DETAILS_QUERY: &str = r#"
    SELECT br.id, br.book_id, br.member_id, br.borrow_date, br.return_date,
           b.title, b.author, m.name AS member_name
    FROM borrow_records br
    JOIN books b ON br.book_id = b.id
    JOIN members m ON br.member_id = m.id
    WHERE br.returned = 0
"#;

/// All outstanding loans with book and member details
pub async fn list_outstanding(conn: &mut SqliteConnection) -> AppResult<Vec<BorrowingDetails>> {
    let rows = sqlx::query_as::<_, BorrowingDetails>(&format!(
        "{OUTSTANDING_DETAILS_QUERY} ORDER BY br.return_date, br.id"
    ))
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// Outstanding loans of one member
pub async fn list_outstanding_for_member(
    conn: &mut SqliteConnection,
    member_id: i64,
) -> AppResult<Vec<BorrowingDetails>> {
    let rows = sqlx::query_as::<_, BorrowingDetails>(&format!(
        "{OUTSTANDING_DETAILS_QUERY} AND br.member_id = ? ORDER BY br.return_date, br.id"
    ))
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}
