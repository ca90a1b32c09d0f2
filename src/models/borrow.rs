//! Borrow record (loan) model and related types

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Fixed loan period, in days
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Expected return date for a loan starting on `borrow_date`
pub fn due_date(borrow_date: NaiveDate) -> NaiveDate {
    borrow_date + Duration::days(LOAN_PERIOD_DAYS)
}

/// Loan state. A record starts outstanding and is returned at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Outstanding,
    Returned,
}

/// Borrow record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    /// Expected return date
    pub return_date: NaiveDate,
    pub returned: bool,
    /// Date the book actually came back
    pub returned_date: Option<NaiveDate>,
}

impl BorrowRecord {
    pub fn status(&self) -> LoanStatus {
        if self.returned {
            LoanStatus::Returned
        } else {
            LoanStatus::Outstanding
        }
    }
}

/// Outstanding loan joined with its book and member, for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowingDetails {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    pub return_date: NaiveDate,
    pub title: String,
    pub author: String,
    pub member_name: String,
    #[sqlx(default)]
    #[serde(default)]
    pub is_overdue: bool,
}

impl BorrowingDetails {
    /// Fill in `is_overdue` relative to `today`
    pub fn with_overdue(mut self, today: NaiveDate) -> Self {
        self.is_overdue = self.return_date < today;
        self
    }
}

/// Borrow request
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct CreateBorrow {
    pub book_id: i64,
    pub member_id: i64,
}

/// Outcome of a return
#[derive(Debug, Clone)]
pub struct ReturnOutcome {
    pub record: BorrowRecord,
    /// True when the record was already returned before this call
    pub already_returned: bool,
}
