//! Authenticated caller identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller resolved from a verified session token.
///
/// Customer operations receive `Option<&CurrentUser>`; `None` means the
/// request carried no session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

impl CurrentUser {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
