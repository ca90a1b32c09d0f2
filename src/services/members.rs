//! Member registration service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member},
    repository::{members, Repository},
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_members(&self) -> AppResult<Vec<Member>> {
        let mut conn = self.repository.acquire().await?;
        members::list(&mut conn).await
    }

    pub async fn get_member(&self, id: i64) -> AppResult<Member> {
        let mut conn = self.repository.acquire().await?;
        members::get_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))
    }

    /// Register a new member, joining today
    pub async fn create_member(&self, member: CreateMember) -> AppResult<Member> {
        member.validate()?;

        let mut conn = self.repository.acquire().await?;
        match members::create(&mut conn, &member, super::today()).await {
            Ok(created) => {
                tracing::info!(member_id = created.id, "Member added");
                Ok(created)
            }
            Err(e) => {
                if let AppError::Conflict(_) = e {
                    tracing::warn!(email = %member.email, "Rejected duplicate email");
                }
                Err(e)
            }
        }
    }
}
