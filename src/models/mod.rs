//! Data models for Bookshelf

pub mod book;
pub mod borrow;
pub mod member;

// Re-export commonly used types
pub use book::{Book, BookAvailability, CreateBook};
pub use borrow::{BorrowRecord, BorrowingDetails, CreateBorrow, LoanStatus, ReturnOutcome};
pub use member::{CreateMember, Member};
