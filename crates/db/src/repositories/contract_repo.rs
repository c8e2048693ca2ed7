//! Repository for the `contracts` table.

use crm_core::types::DbId;
use sqlx::PgPool;

use crate::models::contract::{Contract, ContractForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, service_id, document, conclusion_date, validity_period, \
                       amount, created_at, updated_at";

/// Provides CRUD operations for contracts.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a new contract, returning the created row.
    pub async fn create(pool: &PgPool, input: &ContractForm) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts
                (name, service_id, document, conclusion_date, validity_period, amount)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(&input.name)
            .bind(input.service_id)
            .bind(&input.document)
            .bind(input.conclusion_date)
            .bind(input.validity_period)
            .bind(input.amount)
            .fetch_one(pool)
            .await
    }

    /// Find a contract by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all contracts in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts ORDER BY id ASC");
        sqlx::query_as::<_, Contract>(&query).fetch_all(pool).await
    }

    /// List the contracts signed for a service.
    pub async fn list_by_service(
        pool: &PgPool,
        service_id: DbId,
    ) -> Result<Vec<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE service_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Contract>(&query)
            .bind(service_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every bound field of a contract.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ContractForm,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET
                name = $2,
                service_id = $3,
                document = $4,
                conclusion_date = $5,
                validity_period = $6,
                amount = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.service_id)
            .bind(&input.document)
            .bind(input.conclusion_date)
            .bind(input.validity_period)
            .bind(input.amount)
            .fetch_optional(pool)
            .await
    }

    /// Delete a contract (and the active client it backs).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
