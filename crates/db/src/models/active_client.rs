//! Active client model: the link converting a lead via a contract.

use crm_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An `active_clients` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActiveClient {
    pub id: DbId,
    pub potential_client_id: DbId,
    pub contract_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An active client joined with the names of its lead and contract.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActiveClientDetail {
    pub id: DbId,
    pub potential_client_id: DbId,
    /// The lead's full name, which is also the active client's display name.
    pub full_name: String,
    pub contract_id: DbId,
    pub contract_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `create-active-client/{potential_client_id}`.
///
/// The lead comes from the path, so only the contract is bound here.
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveClientCreateForm {
    #[serde(rename = "contract")]
    pub contract_id: DbId,
}

/// Fields bound by active client update.
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveClientForm {
    #[serde(rename = "potential_client")]
    pub potential_client_id: DbId,
    #[serde(rename = "contract")]
    pub contract_id: DbId,
}
