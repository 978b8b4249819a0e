//! Database repository for sample documents stored in `nosql_test_collection`.

use crate::api::common::PaginationFilter;
use crate::database::models::SampleDataInfo;
use anyhow::Result;
use sqlx::SqlitePool;

pub struct SampleDataRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SampleDataRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, data: &SampleDataInfo) -> Result<SampleDataInfo> {
        let stored = sqlx::query_as::<_, SampleDataInfo>(
            r#"
            INSERT INTO nosql_test_collection (id, name, email, address, count)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, email, address, count
            "#,
        )
        .bind(&data.id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.address)
        .bind(data.count)
        .fetch_one(self.pool)
        .await?;

        Ok(stored)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<SampleDataInfo>> {
        let data = sqlx::query_as::<_, SampleDataInfo>(
            "SELECT id, name, email, address, count FROM nosql_test_collection WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(data)
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nosql_test_collection WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn list(&self, pagination: &PaginationFilter) -> Result<Vec<SampleDataInfo>> {
        let data = sqlx::query_as::<_, SampleDataInfo>(
            r#"
            SELECT id, name, email, address, count
            FROM nosql_test_collection
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(data)
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nosql_test_collection")
            .fetch_one(self.pool)
            .await?;

        Ok(count as u64)
    }
}
