use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_error::ApiError;

/// Session lifecycle as seen by the UI
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    /// Startup session check in flight
    Authenticating,
    Authenticated { username: String },
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthState::Authenticated { username } => Some(username),
            _ => None,
        }
    }
}

/// Auth context provider component
///
/// Starts in `Authenticating` and asks `/me/` whether the cookies still
/// carry a session.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::Authenticating);

    spawn_local(async move {
        match api::me().await {
            Ok(user) => {
                storage::save_username(&user.username);
                set_auth_state.set(AuthState::Authenticated {
                    username: user.username,
                });
            }
            Err(e) => {
                log::debug!("No active session: {}", e);
                set_auth_state.set(AuthState::Anonymous);
            }
        }
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Perform login; cookies are set by the server, the username is kept locally
pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), ApiError> {
    match api::login(username.clone(), password).await {
        Ok(response) => {
            let username = if response.username.is_empty() {
                username
            } else {
                response.username
            };
            storage::save_username(&username);
            log::info!("{}", response.message);
            set_auth_state.set(AuthState::Authenticated { username });
            Ok(())
        }
        Err(e) => {
            set_auth_state.set(AuthState::Anonymous);
            Err(e)
        }
    }
}

/// Perform logout; local state is cleared even if the server call fails
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Err(e) = api::logout().await {
        log::warn!("Logout request failed: {}", e);
    }
    storage::clear_username();
    set_auth_state.set(AuthState::Anonymous);
}
