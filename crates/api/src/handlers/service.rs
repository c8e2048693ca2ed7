//! Handlers for services.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use crm_core::error::CoreError;
use crm_core::permissions::Resource;
use crm_core::types::DbId;
use crm_db::models::service::{Service, ServiceForm};
use crm_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, Create, Delete, Detail, List, Update};
use crate::response::DataResponse;
use crate::routes::list_path;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Service",
        id,
    })
}

/// POST /api/v1/create-service/
pub async fn create(
    State(state): State<AppState>,
    auth: Authorized<Service, Create>,
    Json(form): Json<ServiceForm>,
) -> AppResult<Redirect> {
    form.validate_form()?;
    let service = ServiceRepo::create(&state.pool, &form).await?;
    tracing::info!(user_id = auth.user.user_id, service_id = service.id, "Service created");
    Ok(Redirect::to(&list_path(Resource::Service)))
}

/// GET /api/v1/services/
pub async fn list(
    State(state): State<AppState>,
    _auth: Authorized<Service, List>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/services/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: Authorized<Service, Detail>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: service }))
}

/// POST|PUT /api/v1/services/{id}/update/
pub async fn update(
    State(state): State<AppState>,
    auth: Authorized<Service, Update>,
    Path(id): Path<DbId>,
    Json(form): Json<ServiceForm>,
) -> AppResult<Redirect> {
    form.validate_form()?;
    ServiceRepo::update(&state.pool, id, &form)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(user_id = auth.user.user_id, service_id = id, "Service updated");
    Ok(Redirect::to(&list_path(Resource::Service)))
}

/// POST|DELETE /api/v1/services/{id}/delete/
///
/// Cascades to the service's campaigns and contracts.
pub async fn delete(
    State(state): State<AppState>,
    auth: Authorized<Service, Delete>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    if !ServiceRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = auth.user.user_id, service_id = id, "Service deleted");
    Ok(Redirect::to(&list_path(Resource::Service)))
}
