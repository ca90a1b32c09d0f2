//! Loan lifecycle service: borrow and return

use crate::{
    error::{AppError, AppResult},
    models::borrow::{due_date, BorrowRecord, BorrowingDetails, CreateBorrow, ReturnOutcome},
    repository::{borrows, members, Repository},
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a copy of a book for the fixed loan period
    pub async fn borrow(&self, request: CreateBorrow) -> AppResult<BorrowRecord> {
        let borrow_date = super::today();
        let mut tx = self.repository.begin().await?;

        let inserted = borrows::insert_if_available(
            &mut tx,
            request.book_id,
            request.member_id,
            borrow_date,
            due_date(borrow_date),
        )
        .await?;

        match inserted {
            Some(record) => {
                tx.commit().await?;
                tracing::info!(
                    record_id = record.id,
                    book_id = record.book_id,
                    member_id = record.member_id,
                    due = %record.return_date,
                    "Book borrowed"
                );
                Ok(record)
            }
            None => {
                // Nothing was written; find out which guard refused.
                if !members::exists(&mut tx, request.member_id).await? {
                    return Err(AppError::NotFound(format!(
                        "Member with id {} not found",
                        request.member_id
                    )));
                }
                tracing::warn!(book_id = request.book_id, "Borrow refused, book not available");
                Err(AppError::NotAvailable("Book is not available".to_string()))
            }
        }
    }

    /// Return a borrowed book. Returning an already returned record succeeds
    /// and leaves it unchanged.
    pub async fn return_book(&self, record_id: i64) -> AppResult<ReturnOutcome> {
        let mut tx = self.repository.begin().await?;

        let transitioned = borrows::mark_returned(&mut tx, record_id, super::today()).await?;
        let record = borrows::get_by_id(&mut tx, record_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Borrow record with id {} not found", record_id))
            })?;

        tx.commit().await?;

        if transitioned {
            tracing::info!(record_id, book_id = record.book_id, "Book returned");
        } else {
            tracing::debug!(record_id, "Return of already returned record ignored");
        }

        Ok(ReturnOutcome {
            record,
            already_returned: !transitioned,
        })
    }

    /// All outstanding loans
    pub async fn current_borrowings(&self) -> AppResult<Vec<BorrowingDetails>> {
        let today = super::today();
        let mut conn = self.repository.acquire().await?;
        let rows = borrows::list_outstanding(&mut conn).await?;
        Ok(rows.into_iter().map(|row| row.with_overdue(today)).collect())
    }

    /// Outstanding loans of one member
    pub async fn member_borrowings(&self, member_id: i64) -> AppResult<Vec<BorrowingDetails>> {
        let today = super::today();
        let mut conn = self.repository.acquire().await?;

        if !members::exists(&mut conn, member_id).await? {
            return Err(AppError::NotFound(format!("Member with id {} not found", member_id)));
        }

        let rows = borrows::list_outstanding_for_member(&mut conn, member_id).await?;
        Ok(rows.into_iter().map(|row| row.with_overdue(today)).collect())
    }
}
