//! Identity capability: who is performing a mutation.

use crate::domain::user::AuthenticatedUser;
use crate::services::notify::{Notification, Notifier};
use crate::services::{ServiceError, ServiceResult};

pub trait IdentityProvider: Send + Sync {
    /// The signed-in seller, or `None` when the session is missing.
    fn current_user(&self) -> Option<AuthenticatedUser>;
}

/// Identity fixed at construction time, e.g. from configuration or a test.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<AuthenticatedUser>);

impl StaticIdentity {
    pub fn signed_in(user: AuthenticatedUser) -> Self {
        Self(Some(user))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.0.clone()
    }
}

/// Returns the actor, or notifies and fails with `Unauthorized` when there is none.
pub fn require_actor<'a>(
    actor: Option<&'a AuthenticatedUser>,
    notifier: &dyn Notifier,
) -> ServiceResult<&'a AuthenticatedUser> {
    actor.ok_or_else(|| {
        let err = ServiceError::Unauthorized;
        log::warn!("Rejected mutation without a signed-in user");
        notifier.notify(Notification::error(err.to_string()));
        err
    })
}
