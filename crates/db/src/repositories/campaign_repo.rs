//! Repository for the `campaigns` table.

use crm_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CampaignForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, service_id, promotion_channel, budget, created_at, updated_at";

/// Provides CRUD operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the created row.
    pub async fn create(pool: &PgPool, input: &CampaignForm) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (name, service_id, promotion_channel, budget)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.name)
            .bind(input.service_id)
            .bind(&input.promotion_channel)
            .bind(input.budget)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all campaigns in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns ORDER BY id ASC");
        sqlx::query_as::<_, Campaign>(&query).fetch_all(pool).await
    }

    /// List the campaigns advertising a service.
    pub async fn list_by_service(
        pool: &PgPool,
        service_id: DbId,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE service_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(service_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every bound field of a campaign.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CampaignForm,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                name = $2,
                service_id = $3,
                promotion_channel = $4,
                budget = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.service_id)
            .bind(&input.promotion_channel)
            .bind(input.budget)
            .fetch_optional(pool)
            .await
    }

    /// Delete a campaign and its leads. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
