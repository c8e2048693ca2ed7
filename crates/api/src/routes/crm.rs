//! Route definitions for the CRM records.
//!
//! Every record type follows the same shape, rooted at the `/api/v1` level:
//!
//! ```text
//! POST        /create-<entity>/          -> create
//! GET         /<entities>/               -> list
//! GET         /<entities>/{id}/          -> get_by_id
//! POST|PUT    /<entities>/{id}/update/   -> update
//! POST|DELETE /<entities>/{id}/delete/   -> delete
//! ```
//!
//! Active clients are created from a lead instead:
//! `POST /create-active-client/{potential_client_id}`.

use axum::routing::{get, post};
use axum::Router;
use crm_core::permissions::Resource;

use crate::handlers::{active_client, campaign, contract, potential_client, service};
use crate::routes::segment;
use crate::state::AppState;

/// Mount the read, update and delete routes for one record type.
macro_rules! record_routes {
    ($router:expr, $resource:expr, $handlers:ident) => {{
        let base = format!("/{}", segment($resource));
        $router
            .route(&format!("{base}/"), get($handlers::list))
            .route(&format!("{base}/{{id}}/"), get($handlers::get_by_id))
            .route(
                &format!("{base}/{{id}}/update/"),
                post($handlers::update).put($handlers::update),
            )
            .route(
                &format!("{base}/{{id}}/delete/"),
                post($handlers::delete).delete($handlers::delete),
            )
    }};
}

pub fn router() -> Router<AppState> {
    let router = Router::new()
        .route("/create-service/", post(service::create))
        .route("/create-campaign/", post(campaign::create))
        .route("/create-potential-client/", post(potential_client::create))
        .route("/create-contract/", post(contract::create))
        .route(
            "/create-active-client/{potential_client_id}",
            post(active_client::create),
        );

    let router = record_routes!(router, Resource::Service, service);
    let router = record_routes!(router, Resource::Campaign, campaign);
    let router = record_routes!(router, Resource::PotentialClient, potential_client);
    let router = record_routes!(router, Resource::Contract, contract);
    record_routes!(router, Resource::ActiveClient, active_client)
}
