pub mod auth;
pub mod crm;
pub mod health;

use axum::routing::get;
use axum::Router;
use crm_core::permissions::Resource;

use crate::handlers;
use crate::state::AppState;

/// Mount point of the versioned API.
pub const API_PREFIX: &str = "/api/v1";

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// URL path segment of a record type's collection.
pub fn segment(resource: Resource) -> &'static str {
    match resource {
        Resource::Service => "services",
        Resource::Campaign => "campaigns",
        Resource::PotentialClient => "potential-clients",
        Resource::Contract => "contracts",
        Resource::ActiveClient => "active-clients",
    }
}

/// Absolute path of a record type's list view; successful writes redirect here.
pub fn list_path(resource: Resource) -> String {
    format!("{API_PREFIX}/{}/", segment(resource))
}

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /create-service/                                 create (Marketer)
/// /services/                                       list (Marketer)
/// /services/{id}/                                  detail (Marketer)
/// /services/{id}/update/                           update (Marketer)
/// /services/{id}/delete/                           delete (superuser)
///
/// /create-campaign/, /campaigns/...                as services (Marketer)
///
/// /create-potential-client/                        create (Operator)
/// /potential-clients/                              list (Operator, Manager)
/// /potential-clients/{id}/                         detail (Operator)
/// /potential-clients/{id}/update/                  update (Operator)
/// /potential-clients/{id}/delete/                  delete (superuser)
///
/// /create-contract/, /contracts/...                as services (Manager, multipart)
///
/// /create-active-client/{potential_client_id}      create (Manager)
/// /active-clients/...                              list, detail, update, delete (superuser)
///
/// /statistics/                                     statistics (any authenticated user)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(crm::router())
        .route("/statistics/", get(handlers::statistics::get_statistics))
}
