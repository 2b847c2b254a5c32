//! Session context handed to the booking engine by the host application

use serde::{Deserialize, Serialize};

/// Signed-in user, as far as booking prefill is concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// Read-only session data; the engine never looks up session state itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub current_user: Option<CurrentUser>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: CurrentUser) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.current_user.as_ref().map(|u| u.id.as_str())
    }
}
