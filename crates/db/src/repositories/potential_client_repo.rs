//! Repository for the `potential_clients` table.

use crm_core::types::DbId;
use sqlx::PgPool;

use crate::models::potential_client::{PotentialClient, PotentialClientForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, phone, email, campaign_id, created_at, updated_at";

/// Provides CRUD operations for potential clients.
pub struct PotentialClientRepo;

impl PotentialClientRepo {
    /// Insert a new lead, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &PotentialClientForm,
    ) -> Result<PotentialClient, sqlx::Error> {
        let query = format!(
            "INSERT INTO potential_clients (full_name, phone, email, campaign_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PotentialClient>(&query)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.campaign_id)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PotentialClient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM potential_clients WHERE id = $1");
        sqlx::query_as::<_, PotentialClient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all leads in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<PotentialClient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM potential_clients ORDER BY id ASC");
        sqlx::query_as::<_, PotentialClient>(&query)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every bound field of a lead.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PotentialClientForm,
    ) -> Result<Option<PotentialClient>, sqlx::Error> {
        let query = format!(
            "UPDATE potential_clients SET
                full_name = $2,
                phone = $3,
                email = $4,
                campaign_id = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PotentialClient>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.campaign_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a lead (and its active client, if converted).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM potential_clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
