//! Service for the sample document collection.

use crate::api::common::PaginationFilter;
use crate::database::models::{CreateSampleData, SampleDataInfo};
use crate::errors::{ServiceError, ServiceResult, validation_message};
use crate::repositories::sample_data_repository::SampleDataRepository;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

pub struct SampleDataService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SampleDataService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Stores a document, generating an ID when none is given.
    pub async fn create(&self, request: CreateSampleData) -> ServiceResult<SampleDataInfo> {
        if let Err(validation_errors) = request.validate() {
            return Err(ServiceError::validation(validation_message(
                &validation_errors,
            )));
        }

        let repo = SampleDataRepository::new(self.pool);
        let id = request.id.unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        if repo.exists(&id).await? {
            return Err(ServiceError::already_exists("SampleData", id));
        }

        let data = SampleDataInfo {
            id,
            name: request.name,
            email: request.email,
            address: request.address,
            count: request.count,
        };
        Ok(repo.insert(&data).await?)
    }

    pub async fn get_required(&self, id: &str) -> ServiceResult<SampleDataInfo> {
        SampleDataRepository::new(self.pool)
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("SampleData", id))
    }

    /// Lists one page of documents together with the total count.
    pub async fn list(
        &self,
        pagination: &PaginationFilter,
    ) -> ServiceResult<(Vec<SampleDataInfo>, u64)> {
        if let Err(validation_errors) = pagination.validate() {
            return Err(ServiceError::validation(validation_message(
                &validation_errors,
            )));
        }

        let repo = SampleDataRepository::new(self.pool);
        let items = repo.list(pagination).await?;
        let total = repo.count().await?;
        Ok((items, total))
    }
}
