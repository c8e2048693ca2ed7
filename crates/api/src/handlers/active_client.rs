//! Handlers for active clients.
//!
//! Creation converts a lead: the lead id comes from the path and the
//! contract from the body. Each lead and each contract backs at most one
//! active client; a second link fails on the `uq_active_clients_*`
//! constraints and surfaces as a validation error.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use crm_core::error::CoreError;
use crm_core::permissions::Resource;
use crm_core::types::DbId;
use crm_db::models::active_client::{
    ActiveClient, ActiveClientCreateForm, ActiveClientDetail, ActiveClientForm,
};
use crm_db::repositories::{ActiveClientRepo, PotentialClientRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, Create, Delete, Detail, List, Update};
use crate::response::DataResponse;
use crate::routes::list_path;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ActiveClient",
        id,
    })
}

/// POST /api/v1/create-active-client/{potential_client_id}
pub async fn create(
    State(state): State<AppState>,
    auth: Authorized<ActiveClient, Create>,
    Path(potential_client_id): Path<DbId>,
    Json(form): Json<ActiveClientCreateForm>,
) -> AppResult<Redirect> {
    PotentialClientRepo::find_by_id(&state.pool, potential_client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PotentialClient",
            id: potential_client_id,
        }))?;

    let client = ActiveClientRepo::create(&state.pool, potential_client_id, form.contract_id).await?;
    tracing::info!(
        user_id = auth.user.user_id,
        active_client_id = client.id,
        potential_client_id,
        contract_id = form.contract_id,
        "Potential client converted",
    );
    Ok(Redirect::to(&list_path(Resource::ActiveClient)))
}

/// GET /api/v1/active-clients/
pub async fn list(
    State(state): State<AppState>,
    _auth: Authorized<ActiveClient, List>,
) -> AppResult<Json<DataResponse<Vec<ActiveClientDetail>>>> {
    let clients = ActiveClientRepo::list_details(&state.pool).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/active-clients/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: Authorized<ActiveClient, Detail>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ActiveClientDetail>>> {
    let client = ActiveClientRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: client }))
}

/// POST|PUT /api/v1/active-clients/{id}/update/
pub async fn update(
    State(state): State<AppState>,
    auth: Authorized<ActiveClient, Update>,
    Path(id): Path<DbId>,
    Json(form): Json<ActiveClientForm>,
) -> AppResult<Redirect> {
    ActiveClientRepo::update(&state.pool, id, form.potential_client_id, form.contract_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user.user_id, active_client_id = id, "Active client updated");
    Ok(Redirect::to(&list_path(Resource::ActiveClient)))
}

/// POST|DELETE /api/v1/active-clients/{id}/delete/
pub async fn delete(
    State(state): State<AppState>,
    auth: Authorized<ActiveClient, Delete>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    if !ActiveClientRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = auth.user.user_id, active_client_id = id, "Active client deleted");
    Ok(Redirect::to(&list_path(Resource::ActiveClient)))
}
