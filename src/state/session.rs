use leptos::*;
use serde::{Deserialize, Serialize};

use crate::api::client::CURRENT_USER_KEY;
use crate::utils::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Manager,
    Hr,
}

impl Role {
    /// Managers and HR may decide other employees' leave requests.
    pub fn is_reviewer(self) -> bool {
        matches!(self, Role::Manager | Role::Hr)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Manager => "Manager",
            Role::Hr => "HR",
        }
    }
}

/// Identity and role handed explicitly to authorization-gated operations
/// rather than read from ambient globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub employee_id: String,
    pub display_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<UserContext>,
    pub loading: bool,
}

pub type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

/// Reads the `current_user` record the login shell persisted.
pub fn load_stored_user() -> Option<UserContext> {
    let raw = storage::get_item(CURRENT_USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("stored session is unreadable: {}", err);
            None
        }
    }
}

pub fn provide_session() -> SessionContext {
    let (state, set_state) = create_signal(SessionState {
        user: load_stored_user(),
        loading: false,
    });
    provide_context::<SessionContext>((state, set_state));
    (state, set_state)
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

pub fn clear_session(set_state: WriteSignal<SessionState>) {
    storage::remove_item(CURRENT_USER_KEY);
    set_state.update(|state| state.user = None);
}
