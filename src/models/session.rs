use serde::{Deserialize, Serialize};

/// Where an unauthenticated visitor is expected to be sent
pub const AUTH_REDIRECT: &str = "/auth";

/// What the authentication service currently reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user_id: Option<String>,
    pub loading: bool,
}

impl AuthSnapshot {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        AuthSnapshot {
            user_id: Some(user_id.into()),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        AuthSnapshot::default()
    }

    pub fn loading() -> Self {
        AuthSnapshot {
            user_id: None,
            loading: true,
        }
    }

    /// Redirect target once the session has settled without a user
    pub fn redirect_target(&self) -> Option<&'static str> {
        if self.loading || self.user_id.is_some() {
            None
        } else {
            Some(AUTH_REDIRECT)
        }
    }
}
