//! Borrow and return endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::borrow::{BorrowRecord, BorrowingDetails, CreateBorrow, LoanStatus},
};

/// Return response with the record after the call
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Loan state after the call
    pub status: LoanStatus,
    /// True when the record had already been returned before this call
    pub already_returned: bool,
    pub record: BorrowRecord,
}

/// List current (outstanding) borrowings
#[utoipa::path(
    get,
    path = "/borrowings",
    tag = "loans",
    responses(
        (status = 200, description = "Outstanding loans", body = Vec<BorrowingDetails>)
    )
)]
pub async fn list_current_borrowings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BorrowingDetails>>> {
    let borrowings = state.services.loans.current_borrowings().await?;
    Ok(Json(borrowings))
}

/// Get outstanding loans of a member
#[utoipa::path(
    get,
    path = "/members/{id}/borrowings",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Member's outstanding loans", body = Vec<BorrowingDetails>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member_borrowings(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Vec<BorrowingDetails>>> {
    let borrowings = state.services.loans.member_borrowings(member_id).await?;
    Ok(Json(borrowings))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrowings",
    tag = "loans",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Book borrowed", body = BorrowRecord),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Book is not available")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<BorrowRecord>)> {
    let record = state.services.loans.borrow(request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/borrowings/{id}/return",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (status = 404, description = "Borrow record not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(record_id): Path<i64>,
) -> AppResult<Json<ReturnResponse>> {
    let outcome = state.services.loans.return_book(record_id).await?;

    Ok(Json(ReturnResponse {
        status: outcome.record.status(),
        already_returned: outcome.already_returned,
        record: outcome.record,
    }))
}
