//! Campaign entity model and form.

use crm_core::error::CoreError;
use crm_core::types::{DbId, Money, Timestamp};
use crm_core::validation::{ensure_money, validate_fields};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A campaign row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub name: String,
    pub service_id: DbId,
    pub promotion_channel: String,
    pub budget: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields bound by campaign create and update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CampaignForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// The advertised service.
    #[serde(rename = "service")]
    pub service_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub promotion_channel: String,
    pub budget: Money,
}

impl CampaignForm {
    pub fn validate_form(&self) -> Result<(), CoreError> {
        validate_fields(self)?;
        ensure_money("budget", self.budget)
    }
}
