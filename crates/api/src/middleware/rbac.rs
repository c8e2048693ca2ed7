//! Group- and superuser-based access control extractors.
//!
//! [`Authorized<R, A>`] authenticates the request, looks up the
//! [`Requirement`](crm_core::permissions::Requirement) for resource `R` and
//! action `A` in the permission matrix, and rejects with 403 Forbidden when
//! the caller does not satisfy it. Being a `FromRequestParts` extractor it
//! runs before any body extractor, so a rejected request never has its body
//! parsed.
//!
//! ```ignore
//! async fn create(
//!     State(state): State<AppState>,
//!     auth: Authorized<Service, Create>,
//!     Json(form): Json<ServiceForm>,
//! ) -> AppResult<Redirect> { .. }
//! ```

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use crm_core::permissions::{authorize, requirement_for, Action, Resource};
use crm_db::models::active_client::ActiveClient;
use crm_db::models::campaign::Campaign;
use crm_db::models::contract::Contract;
use crm_db::models::potential_client::PotentialClient;
use crm_db::models::service::Service;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// A record type covered by the permission matrix.
pub trait Guarded {
    const RESOURCE: Resource;
}

impl Guarded for Service {
    const RESOURCE: Resource = Resource::Service;
}

impl Guarded for Campaign {
    const RESOURCE: Resource = Resource::Campaign;
}

impl Guarded for PotentialClient {
    const RESOURCE: Resource = Resource::PotentialClient;
}

impl Guarded for Contract {
    const RESOURCE: Resource = Resource::Contract;
}

impl Guarded for ActiveClient {
    const RESOURCE: Resource = Resource::ActiveClient;
}

/// Type-level marker for an [`Action`].
pub trait Operation {
    const ACTION: Action;
}

macro_rules! operation_markers {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Marker for [`Action::", stringify!($name), "`].")]
            pub struct $name;

            impl Operation for $name {
                const ACTION: Action = Action::$name;
            }
        )+
    };
}

operation_markers!(Create, List, Detail, Update, Delete);

/// An authenticated user permitted to perform `A` on `R`.
pub struct Authorized<R, A> {
    pub user: AuthUser,
    _guard: PhantomData<fn() -> (R, A)>,
}

impl<R, A> FromRequestParts<AppState> for Authorized<R, A>
where
    R: Guarded,
    A: Operation,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let requirement = requirement_for(R::RESOURCE, A::ACTION);

        if let Err(e) = authorize(&user.actor(), requirement) {
            tracing::info!(
                user_id = user.user_id,
                resource = R::RESOURCE.name(),
                action = ?A::ACTION,
                "Permission denied",
            );
            return Err(e.into());
        }

        Ok(Authorized {
            user,
            _guard: PhantomData,
        })
    }
}
