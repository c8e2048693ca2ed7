//! Contract entity model and form.

use chrono::NaiveDate;
use crm_core::error::CoreError;
use crm_core::types::{DbId, Money, Timestamp};
use crm_core::validation::{ensure_money, validate_fields};
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// Directory (relative to the media root) holding contract documents.
pub const DOCUMENTS_DIR: &str = "documents";

/// A contract row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub name: String,
    pub service_id: DbId,
    /// Path of the uploaded document relative to the media root.
    pub document: String,
    pub conclusion_date: NaiveDate,
    /// Validity in days.
    pub validity_period: i32,
    pub amount: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields bound by contract create and update.
///
/// Built from a multipart body; `document` is the stored relative path, not
/// the uploaded bytes.
#[derive(Debug, Clone, Validate)]
pub struct ContractForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub service_id: DbId,
    #[validate(length(min = 1))]
    pub document: String,
    pub conclusion_date: NaiveDate,
    #[validate(range(min = 1))]
    pub validity_period: i32,
    pub amount: Money,
}

impl ContractForm {
    pub fn validate_form(&self) -> Result<(), CoreError> {
        validate_fields(self)?;
        ensure_money("amount", self.amount)
    }
}
