//! Caller capability
//!
//! The credential-resolving middleware in the adapter layer turns each
//! request into one of these before any service runs. Defined in the ports
//! crate so adapters and the application layer share it without circular
//! dependencies.
//!
//! An unauthenticated request never becomes a `Caller` - the middleware
//! rejects it first - so services only ever see the two authenticated
//! shapes and authorization has a single tagged value to match on.

use fray_domain::UserId;

/// The authenticated identity behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// An end user bound to a specific user id.
    EndUser(UserId),
    /// The service credential: not bound to a user, may act on behalf of
    /// any owner supplied explicitly in the request.
    Privileged,
}

impl Caller {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::EndUser(id) => Some(*id),
            Self::Privileged => None,
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Privileged)
    }

    /// Resolve the owner for a create operation.
    ///
    /// End users own what they create (an explicit owner is ignored);
    /// privileged callers must name the owner explicitly. `None` means the
    /// operation cannot resolve an owner and must be rejected.
    pub fn resolve_owner(&self, explicit: Option<UserId>) -> Option<UserId> {
        match self {
            Self::EndUser(id) => Some(*id),
            Self::Privileged => explicit,
        }
    }

    /// Whether this caller may mutate a record owned by `owner`.
    pub fn may_act_for(&self, owner: UserId) -> bool {
        match self {
            Self::Privileged => true,
            Self::EndUser(id) => *id == owner,
        }
    }
}
