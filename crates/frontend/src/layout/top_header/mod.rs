//! TopHeader component - application top navigation bar.
//!
//! Brand, global search, current user and logout.

use crate::system::auth::context::{do_logout, use_auth};
use crate::system::auth::storage;
use crate::shared::icons::icon;
use crate::usecases::u101_global_search::GlobalSearch;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// First letter of the username, shown in the avatar
pub fn initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string())
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    let username = move || {
        auth_state
            .get()
            .username()
            .map(str::to_string)
            .or_else(storage::get_username)
            .unwrap_or_else(|| "Usuario".to_string())
    };

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <span class="top-header__title">"Farmacia"</span>
            </div>

            <div class="top-header__search">
                <GlobalSearch />
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span class="top-header__avatar">{move || initial(&username())}</span>
                    <span>{username}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Cerrar sesión">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        assert_eq!(initial("maria"), "M");
        assert_eq!(initial("ñandú"), "Ñ");
        assert_eq!(initial(""), "?");
    }
}
