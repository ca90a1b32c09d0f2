//! Members repository

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member},
};

/// List all members
pub async fn list(conn: &mut SqliteConnection) -> AppResult<Vec<Member>> {
    let members = sqlx::query_as::<_, Member>(
        "SELECT id, name, email, phone, join_date FROM members ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(members)
}

/// Get member by ID
pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Member>> {
    let member = sqlx::query_as::<_, Member>(
        "SELECT id, name, email, phone, join_date FROM members WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(member)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(exists)
}

/// Insert a new member joining on `join_date`. A duplicate email is rejected
/// and nothing is written.
pub async fn create(
    conn: &mut SqliteConnection,
    member: &CreateMember,
    join_date: NaiveDate,
) -> AppResult<Member> {
    sqlx::query_as::<_, Member>(
        r#"
        INSERT INTO members (name, email, phone, join_date)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, email, phone, join_date
        "#,
    )
    .bind(member.name.trim())
    .bind(member.email.trim())
    .bind(member.normalized_phone())
    .bind(join_date)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| AppError::on_unique_violation(e, "Member with this email already exists"))
}
