//! Handlers for potential clients (leads).

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use crm_core::error::CoreError;
use crm_core::permissions::Resource;
use crm_core::types::DbId;
use crm_db::models::potential_client::{PotentialClient, PotentialClientForm};
use crm_db::repositories::{ActiveClientRepo, PotentialClientRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, Create, Delete, Detail, List, Update};
use crate::response::DataResponse;
use crate::routes::list_path;
use crate::state::AppState;

/// Lead list payload.
#[derive(Debug, Serialize)]
pub struct PotentialClientListing {
    pub items: Vec<PotentialClient>,
    /// Ids of the listed leads that already back an active client.
    pub active_client_ids: Vec<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PotentialClient",
        id,
    })
}

/// POST /api/v1/create-potential-client/
pub async fn create(
    State(state): State<AppState>,
    auth: Authorized<PotentialClient, Create>,
    Json(form): Json<PotentialClientForm>,
) -> AppResult<Redirect> {
    form.validate_form()?;
    let lead = PotentialClientRepo::create(&state.pool, &form).await?;
    tracing::info!(
        user_id = auth.user.user_id,
        potential_client_id = lead.id,
        campaign_id = lead.campaign_id,
        "Potential client created",
    );
    Ok(Redirect::to(&list_path(Resource::PotentialClient)))
}

/// GET /api/v1/potential-clients/
///
/// Open to Operators and Managers.
pub async fn list(
    State(state): State<AppState>,
    _auth: Authorized<PotentialClient, List>,
) -> AppResult<Json<DataResponse<PotentialClientListing>>> {
    let items = PotentialClientRepo::list(&state.pool).await?;
    let ids: Vec<DbId> = items.iter().map(|pc| pc.id).collect();
    let active_client_ids = ActiveClientRepo::converted_potential_client_ids(&state.pool, &ids).await?;

    Ok(Json(DataResponse {
        data: PotentialClientListing {
            items,
            active_client_ids,
        },
    }))
}

/// GET /api/v1/potential-clients/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: Authorized<PotentialClient, Detail>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PotentialClient>>> {
    let lead = PotentialClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: lead }))
}

/// POST|PUT /api/v1/potential-clients/{id}/update/
pub async fn update(
    State(state): State<AppState>,
    auth: Authorized<PotentialClient, Update>,
    Path(id): Path<DbId>,
    Json(form): Json<PotentialClientForm>,
) -> AppResult<Redirect> {
    form.validate_form()?;
    PotentialClientRepo::update(&state.pool, id, &form)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user.user_id, potential_client_id = id, "Potential client updated");
    Ok(Redirect::to(&list_path(Resource::PotentialClient)))
}

/// POST|DELETE /api/v1/potential-clients/{id}/delete/
pub async fn delete(
    State(state): State<AppState>,
    auth: Authorized<PotentialClient, Delete>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    if !PotentialClientRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = auth.user.user_id, potential_client_id = id, "Potential client deleted");
    Ok(Redirect::to(&list_path(Resource::PotentialClient)))
}
