//! Handlers for advertising campaigns.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use crm_core::error::CoreError;
use crm_core::permissions::Resource;
use crm_core::types::DbId;
use crm_db::models::campaign::{Campaign, CampaignForm};
use crm_db::repositories::CampaignRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, Create, Delete, Detail, List, Update};
use crate::response::DataResponse;
use crate::routes::list_path;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Campaign",
        id,
    })
}

/// POST /api/v1/create-campaign/
pub async fn create(
    State(state): State<AppState>,
    auth: Authorized<Campaign, Create>,
    Json(form): Json<CampaignForm>,
) -> AppResult<Redirect> {
    form.validate_form()?;
    let campaign = CampaignRepo::create(&state.pool, &form).await?;
    tracing::info!(user_id = auth.user.user_id, campaign_id = campaign.id, "Campaign created");
    Ok(Redirect::to(&list_path(Resource::Campaign)))
}

/// GET /api/v1/campaigns/
pub async fn list(
    State(state): State<AppState>,
    _auth: Authorized<Campaign, List>,
) -> AppResult<Json<DataResponse<Vec<Campaign>>>> {
    let campaigns = CampaignRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// GET /api/v1/campaigns/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: Authorized<Campaign, Detail>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    let campaign = CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: campaign }))
}

/// POST|PUT /api/v1/campaigns/{id}/update/
pub async fn update(
    State(state): State<AppState>,
    auth: Authorized<Campaign, Update>,
    Path(id): Path<DbId>,
    Json(form): Json<CampaignForm>,
) -> AppResult<Redirect> {
    form.validate_form()?;
    CampaignRepo::update(&state.pool, id, &form)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user.user_id, campaign_id = id, "Campaign updated");
    Ok(Redirect::to(&list_path(Resource::Campaign)))
}

/// POST|DELETE /api/v1/campaigns/{id}/delete/
///
/// Cascades to the leads the campaign brought in.
pub async fn delete(
    State(state): State<AppState>,
    auth: Authorized<Campaign, Delete>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    if !CampaignRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = auth.user.user_id, campaign_id = id, "Campaign deleted");
    Ok(Redirect::to(&list_path(Resource::Campaign)))
}
