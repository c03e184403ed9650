use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Who is using the client right now.
///
/// The backend trusts whatever user id the client sends; this value only
/// decides whether pages that need a user are reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    Authenticated {
        user_id: UserId,
        #[serde(default)]
        is_admin: bool,
    },
    #[default]
    Unauthenticated,
}

impl Session {
    pub fn student(user_id: impl Into<UserId>) -> Self {
        Session::Authenticated {
            user_id: user_id.into(),
            is_admin: false,
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Session::Authenticated { user_id, .. } => Some(user_id),
            Session::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Authenticated { is_admin: true, .. })
    }
}
