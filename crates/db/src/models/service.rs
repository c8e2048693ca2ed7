//! Service entity model and form.

use crm_core::error::CoreError;
use crm_core::types::{DbId, Money, Timestamp};
use crm_core::validation::{ensure_money, validate_fields};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A service row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub cost: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields bound by service create and update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: String,
    pub cost: Money,
}

impl ServiceForm {
    pub fn validate_form(&self) -> Result<(), CoreError> {
        validate_fields(self)?;
        ensure_money("cost", self.cost)
    }
}
