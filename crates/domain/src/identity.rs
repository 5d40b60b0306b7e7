use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

/// The caller of a request as asserted by the auth collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    /// Authenticated with the admin api key, not tied to a user
    ApiKey,
    User { user_id: ID, role: Role },
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        match self {
            Self::ApiKey => true,
            Self::User { role, .. } => *role == Role::Admin,
        }
    }

    pub fn user_id(&self) -> Option<&ID> {
        match self {
            Self::ApiKey => None,
            Self::User { user_id, .. } => Some(user_id),
        }
    }

    /// Admins can act on behalf of every user, customers only for themselves
    pub fn can_access_user(&self, user_id: &ID) -> bool {
        self.is_admin() || self.user_id() == Some(user_id)
    }
}
