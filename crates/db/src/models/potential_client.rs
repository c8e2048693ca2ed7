//! Potential client (lead) entity model and form.

use crm_core::error::CoreError;
use crm_core::types::{DbId, Timestamp};
use crm_core::validation::validate_fields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A lead row from the `potential_clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PotentialClient {
    pub id: DbId,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub campaign_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields bound by potential client create and update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PotentialClientForm {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(length(min = 1, max = 11))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    /// The campaign the lead came from.
    #[serde(rename = "campaign")]
    pub campaign_id: DbId,
}

impl PotentialClientForm {
    pub fn validate_form(&self) -> Result<(), CoreError> {
        validate_fields(self)
    }
}
