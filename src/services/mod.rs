//! Business logic services

pub mod catalog;
pub mod loans;
pub mod members;

use chrono::{Local, NaiveDate};

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    pub loans: loans::LoansService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            repository,
        }
    }

    /// Verify the database answers
    pub async fn check_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Calendar date used for join, borrow and return dates
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
