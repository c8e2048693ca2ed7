//! Aggregate reads behind the statistics page.

use crm_core::statistics::StatisticsTotals;
use crm_core::types::Money;
use sqlx::PgPool;

/// Provides the single aggregate query for statistics.
pub struct StatisticsRepo;

impl StatisticsRepo {
    /// Count leads and active clients and sum contract amounts and campaign
    /// budgets in one round trip. Empty tables sum to zero.
    pub async fn totals(pool: &PgPool) -> Result<StatisticsTotals, sqlx::Error> {
        let (potential_clients, active_clients, total_income, total_expenses): (
            i64,
            i64,
            Money,
            Money,
        ) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM potential_clients),
                (SELECT COUNT(*) FROM active_clients),
                (SELECT COALESCE(SUM(amount), 0) FROM contracts),
                (SELECT COALESCE(SUM(budget), 0) FROM campaigns)",
        )
        .fetch_one(pool)
        .await?;

        Ok(StatisticsTotals {
            potential_clients,
            active_clients,
            total_income,
            total_expenses,
        })
    }
}
