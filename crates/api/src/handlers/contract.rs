//! Handlers for contracts.
//!
//! Create and update take `multipart/form-data`: the scalar fields as text
//! parts plus a `document` file part. The uploaded document is written to the
//! [`DocumentStore`](crate::storage::DocumentStore) and the contract row keeps
//! its relative path.

use std::str::FromStr;

use axum::extract::{Multipart, Path, State};
use axum::response::Redirect;
use axum::Json;
use chrono::NaiveDate;
use crm_core::error::CoreError;
use crm_core::permissions::Resource;
use crm_core::types::{DbId, Money};
use crm_db::models::contract::{Contract, ContractForm};
use crm_db::repositories::ContractRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{Authorized, Create, Delete, Detail, List, Update};
use crate::response::DataResponse;
use crate::routes::list_path;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contract",
        id,
    })
}

// ---------------------------------------------------------------------------
// Multipart parsing
// ---------------------------------------------------------------------------

/// An uploaded file part.
struct Upload {
    file_name: String,
    data: Vec<u8>,
}

/// The raw parts of a contract form.
#[derive(Default)]
struct ContractUpload {
    name: Option<String>,
    service: Option<String>,
    conclusion_date: Option<String>,
    validity_period: Option<String>,
    amount: Option<String>,
    document: Option<Upload>,
}

impl ContractUpload {
    async fn read(multipart: &mut Multipart) -> AppResult<Self> {
        let mut upload = ContractUpload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "document" {
                let file_name = field.file_name().unwrap_or("document").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                upload.document = Some(Upload {
                    file_name,
                    data: data.to_vec(),
                });
                continue;
            }

            let slot = match name.as_str() {
                "name" => &mut upload.name,
                "service" => &mut upload.service,
                "conclusion_date" => &mut upload.conclusion_date,
                "validity_period" => &mut upload.validity_period,
                "amount" => &mut upload.amount,
                _ => continue,
            };
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            *slot = Some(text);
        }

        Ok(upload)
    }

    /// Parse the scalar fields into a form referencing `document`.
    fn into_form(self, document: String) -> Result<ContractForm, CoreError> {
        Ok(ContractForm {
            name: required("name", self.name)?,
            service_id: parse("service", required("service", self.service)?)?,
            document,
            conclusion_date: parse::<NaiveDate>(
                "conclusion_date",
                required("conclusion_date", self.conclusion_date)?,
            )?,
            validity_period: parse(
                "validity_period",
                required("validity_period", self.validity_period)?,
            )?,
            amount: parse::<Money>("amount", required("amount", self.amount)?)?,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field}: this field is required")))
}

fn parse<T>(field: &str, raw: String) -> Result<T, CoreError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| CoreError::Validation(format!("{field}: {e}")))
}

/// Store `upload`, then run `write` with the stored path in `form.document`.
/// The stored file is removed again when `write` fails.
async fn write_with_document<T, F, Fut>(
    state: &AppState,
    mut form: ContractForm,
    upload: Upload,
    write: F,
) -> AppResult<T>
where
    F: FnOnce(ContractForm) -> Fut,
    Fut: std::future::Future<Output = Result<T, sqlx::Error>>,
{
    let stored = state
        .documents
        .save(&upload.file_name, &upload.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store document: {e}")))?;
    form.document = stored.clone();

    match write(form).await {
        Ok(value) => Ok(value),
        Err(e) => {
            state.documents.remove(&stored).await;
            Err(e.into())
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/create-contract/
pub async fn create(
    State(state): State<AppState>,
    auth: Authorized<Contract, Create>,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let mut upload = ContractUpload::read(&mut multipart).await?;
    let document = upload
        .document
        .take()
        .ok_or_else(|| CoreError::Validation("document: a file is required".into()))?;

    // The client file name stands in for the stored path until the form
    // passes validation, so nothing is written for an invalid form.
    let form = upload.into_form(document.file_name.clone())?;
    form.validate_form()?;

    let pool = state.pool.clone();
    let contract = write_with_document(&state, form, document, |form| async move {
        ContractRepo::create(&pool, &form).await
    })
    .await?;

    tracing::info!(
        user_id = auth.user.user_id,
        contract_id = contract.id,
        document = %contract.document,
        "Contract created",
    );
    Ok(Redirect::to(&list_path(Resource::Contract)))
}

/// GET /api/v1/contracts/
pub async fn list(
    State(state): State<AppState>,
    _auth: Authorized<Contract, List>,
) -> AppResult<Json<DataResponse<Vec<Contract>>>> {
    let contracts = ContractRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: contracts }))
}

/// GET /api/v1/contracts/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: Authorized<Contract, Detail>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Contract>>> {
    let contract = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: contract }))
}

/// POST|PUT /api/v1/contracts/{id}/update/
///
/// The `document` part is optional; without it the stored document is kept.
/// A replaced document file is left on disk.
pub async fn update(
    State(state): State<AppState>,
    auth: Authorized<Contract, Update>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let existing = ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut upload = ContractUpload::read(&mut multipart).await?;
    let document = upload.document.take();

    let contract = match document {
        None => {
            let form = upload.into_form(existing.document)?;
            form.validate_form()?;
            ContractRepo::update(&state.pool, id, &form)
                .await?
                .ok_or_else(|| not_found(id))?
        }
        Some(document) => {
            let form = upload.into_form(document.file_name.clone())?;
            form.validate_form()?;

            let pool = state.pool.clone();
            write_with_document(&state, form, document, |form| async move {
                // A row deleted meanwhile counts as a failed write.
                ContractRepo::update(&pool, id, &form)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)
            })
            .await?
        }
    };

    tracing::info!(
        user_id = auth.user.user_id,
        contract_id = contract.id,
        "Contract updated",
    );
    Ok(Redirect::to(&list_path(Resource::Contract)))
}

/// POST|DELETE /api/v1/contracts/{id}/delete/
///
/// Cascades to the active client backed by this contract.
pub async fn delete(
    State(state): State<AppState>,
    auth: Authorized<Contract, Delete>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    if !ContractRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = auth.user.user_id, contract_id = id, "Contract deleted");
    Ok(Redirect::to(&list_path(Resource::Contract)))
}
