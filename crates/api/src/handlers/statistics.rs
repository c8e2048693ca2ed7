//! Handler for the back-office statistics page.

use axum::extract::State;
use axum::Json;
use crm_core::statistics::Statistics;
use crm_db::repositories::StatisticsRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/statistics/
///
/// Any authenticated user may read the statistics. The result may be up to
/// `STATISTICS_CACHE_SECS` old.
pub async fn get_statistics(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Statistics>>> {
    let pool = state.pool.clone();
    let statistics = state
        .statistics
        .get_or_load(|| async move { StatisticsRepo::totals(&pool).await.map(Statistics::from) })
        .await?;
    Ok(Json(DataResponse { data: statistics }))
}
