//! Repository for the `groups` and `user_groups` tables.

use crm_core::types::DbId;
use sqlx::PgPool;

use crate::models::group::Group;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides group lookups and membership management.
pub struct GroupRepo;

impl GroupRepo {
    /// Find a group by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups WHERE name = $1");
        sqlx::query_as::<_, Group>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all groups ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Group>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM groups ORDER BY id ASC");
        sqlx::query_as::<_, Group>(&query).fetch_all(pool).await
    }

    /// Add a user to the named group. Returns `false` if the group does not
    /// exist or the user is already a member.
    pub async fn add_member(
        pool: &PgPool,
        user_id: DbId,
        group_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_groups (user_id, group_id)
             SELECT $1, id FROM groups WHERE name = $2
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(group_name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Names of every group the user belongs to, alphabetically.
    pub async fn names_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT g.name FROM groups g
             JOIN user_groups ug ON ug.group_id = g.id
             WHERE ug.user_id = $1
             ORDER BY g.name ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
