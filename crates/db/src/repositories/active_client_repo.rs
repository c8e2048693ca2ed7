//! Repository for the `active_clients` table.
//!
//! Each lead and each contract backs at most one active client; the
//! `uq_active_clients_*` constraints reject a second link.

use crm_core::types::DbId;
use sqlx::PgPool;

use crate::models::active_client::{ActiveClient, ActiveClientDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, potential_client_id, contract_id, created_at, updated_at";

/// Joined projection used by list and detail reads.
const DETAIL_SELECT: &str = "SELECT ac.id, ac.potential_client_id, pc.full_name, \
                                    ac.contract_id, c.name AS contract_name, \
                                    ac.created_at, ac.updated_at
                             FROM active_clients ac
                             JOIN potential_clients pc ON pc.id = ac.potential_client_id
                             JOIN contracts c ON c.id = ac.contract_id";

/// Provides CRUD operations for active clients.
pub struct ActiveClientRepo;

impl ActiveClientRepo {
    /// Link a lead to a contract, returning the created row.
    pub async fn create(
        pool: &PgPool,
        potential_client_id: DbId,
        contract_id: DbId,
    ) -> Result<ActiveClient, sqlx::Error> {
        let query = format!(
            "INSERT INTO active_clients (potential_client_id, contract_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActiveClient>(&query)
            .bind(potential_client_id)
            .bind(contract_id)
            .fetch_one(pool)
            .await
    }

    /// Find an active client by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ActiveClient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM active_clients WHERE id = $1");
        sqlx::query_as::<_, ActiveClient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the active client backed by a lead, if the lead has been converted.
    pub async fn find_by_potential_client(
        pool: &PgPool,
        potential_client_id: DbId,
    ) -> Result<Option<ActiveClient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM active_clients WHERE potential_client_id = $1");
        sqlx::query_as::<_, ActiveClient>(&query)
            .bind(potential_client_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active client together with its lead and contract names.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ActiveClientDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE ac.id = $1");
        sqlx::query_as::<_, ActiveClientDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active clients with their lead and contract names.
    pub async fn list_details(pool: &PgPool) -> Result<Vec<ActiveClientDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY ac.id ASC");
        sqlx::query_as::<_, ActiveClientDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// Of the given lead ids, return those already backing an active client.
    pub async fn converted_potential_client_ids(
        pool: &PgPool,
        potential_client_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT potential_client_id FROM active_clients
             WHERE potential_client_id = ANY($1)
             ORDER BY potential_client_id ASC",
        )
        .bind(potential_client_ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Re-link an active client to a different lead and/or contract.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        potential_client_id: DbId,
        contract_id: DbId,
    ) -> Result<Option<ActiveClient>, sqlx::Error> {
        let query = format!(
            "UPDATE active_clients SET potential_client_id = $2, contract_id = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActiveClient>(&query)
            .bind(id)
            .bind(potential_client_id)
            .bind(contract_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an active client. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM active_clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
