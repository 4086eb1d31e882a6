use serde::{Deserialize, Serialize};

use crate::domain::types::SellerId;

/// Currently signed-in seller as reported by the identity provider.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: SellerId,
    pub name: String,
    pub email: String,
}
