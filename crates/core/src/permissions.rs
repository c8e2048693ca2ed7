//! Authorization requirements and the per-resource permission matrix.
//!
//! A protected operation declares exactly one [`Requirement`]: either
//! membership in one of a set of named groups, or superuser status. The
//! requirement is evaluated against an authenticated [`Actor`] by
//! [`Requirement::is_satisfied_by`]; authentication itself happens earlier,
//! in the HTTP layer.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::groups::{GROUP_MANAGER, GROUP_MARKETER, GROUP_OPERATOR};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The authenticated principal a request runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub groups: BTreeSet<String>,
    pub is_superuser: bool,
}

impl Actor {
    pub fn new<I, S>(user_id: DbId, groups: I, is_superuser: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id,
            groups: groups.into_iter().map(Into::into).collect(),
            is_superuser,
        }
    }

    /// `true` if the actor belongs to at least one of `names`.
    pub fn in_any_group(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.groups.contains(*name))
    }
}

// ---------------------------------------------------------------------------
// Requirement
// ---------------------------------------------------------------------------

/// The capability a protected operation demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The actor must belong to at least one of these groups.
    ///
    /// Superuser status does not satisfy this variant on its own.
    AnyGroup(&'static [&'static str]),
    /// The actor must hold the superuser flag.
    Superuser,
}

impl Requirement {
    /// Evaluate the requirement for `actor`.
    ///
    /// Returns [`CoreError::Misconfigured`] for a group requirement with no
    /// groups; an empty requirement never grants access.
    pub fn is_satisfied_by(&self, actor: &Actor) -> Result<bool, CoreError> {
        match self {
            Requirement::AnyGroup(names) if names.is_empty() => Err(CoreError::Misconfigured(
                "group requirement declared without any group names".into(),
            )),
            Requirement::AnyGroup(names) => Ok(actor.in_any_group(names)),
            Requirement::Superuser => Ok(actor.is_superuser),
        }
    }

    /// Short human-readable description used in forbidden messages.
    pub fn describe(&self) -> String {
        match self {
            Requirement::AnyGroup(names) => format!("membership in one of: {}", names.join(", ")),
            Requirement::Superuser => "superuser status".to_string(),
        }
    }
}

/// Check `requirement` for `actor`, mapping a denial to [`CoreError::Forbidden`].
pub fn authorize(actor: &Actor, requirement: Requirement) -> Result<(), CoreError> {
    if requirement.is_satisfied_by(actor)? {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "This action requires {}",
            requirement.describe()
        )))
    }
}

// ---------------------------------------------------------------------------
// Permission matrix
// ---------------------------------------------------------------------------

/// The record types guarded by the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Service,
    Campaign,
    PotentialClient,
    Contract,
    ActiveClient,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Service,
        Resource::Campaign,
        Resource::PotentialClient,
        Resource::Contract,
        Resource::ActiveClient,
    ];

    /// Entity name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Service => "Service",
            Resource::Campaign => "Campaign",
            Resource::PotentialClient => "PotentialClient",
            Resource::Contract => "Contract",
            Resource::ActiveClient => "ActiveClient",
        }
    }
}

/// Operations a handler can perform on a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    List,
    Detail,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::List,
        Action::Detail,
        Action::Update,
        Action::Delete,
    ];
}

const MARKETERS: &[&str] = &[GROUP_MARKETER];
const OPERATORS: &[&str] = &[GROUP_OPERATOR];
const MANAGERS: &[&str] = &[GROUP_MANAGER];
const OPERATORS_OR_MANAGERS: &[&str] = &[GROUP_OPERATOR, GROUP_MANAGER];

/// The requirement guarding `action` on `resource`.
///
/// Every delete is superuser-only. ActiveClient reads and updates are
/// superuser-only; its creation is a Manager operation.
pub fn requirement_for(resource: Resource, action: Action) -> Requirement {
    use Action::*;
    use Resource::*;

    match (resource, action) {
        (_, Delete) => Requirement::Superuser,

        (Service | Campaign, Create | Update | List | Detail) => Requirement::AnyGroup(MARKETERS),

        (PotentialClient, List) => Requirement::AnyGroup(OPERATORS_OR_MANAGERS),
        (PotentialClient, Create | Update | Detail) => Requirement::AnyGroup(OPERATORS),

        (Contract, Create | Update | List | Detail) => Requirement::AnyGroup(MANAGERS),

        (ActiveClient, Create) => Requirement::AnyGroup(MANAGERS),
        (ActiveClient, Update | List | Detail) => Requirement::Superuser,
    }
}
