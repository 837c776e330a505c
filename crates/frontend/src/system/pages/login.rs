use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_error::ApiError;
use crate::system::auth::context::{do_login, use_auth};

/// Text shown for a failed login attempt
pub fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Usuario o contraseña incorrectos.".to_string(),
        ApiError::Validation(errors) => errors
            .0
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let (_, set_auth_state) = use_auth();

    let submit = move || {
        if is_loading.get_untracked() {
            return;
        }
        let username_val = username.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        if username_val.is_empty() || password_val.is_empty() {
            error_message.set(Some("Ingrese usuario y contraseña.".to_string()));
            return;
        }

        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            // on success the auth state switches the page to the main layout
            if let Err(e) = do_login(set_auth_state, username_val, password_val).await {
                log::warn!("Login failed: {}", e);
                error_message.try_set(Some(login_error_message(&e)));
            }
            is_loading.try_set(false);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit();
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Farmacia"</h1>
                <h2>"Iniciar sesión"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="alert alert--error">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label class="form__label" for="username">"Usuario"</label>
                        <input
                            type="text"
                            id="username"
                            class="form__input"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label class="form__label" for="password">"Contraseña"</label>
                        <input
                            type="password"
                            id="password"
                            class="form__input"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="button button--primary login-button"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_messages() {
        assert_eq!(
            login_error_message(&ApiError::Unauthorized),
            "Usuario o contraseña incorrectos."
        );
        let err = ApiError::from_status(400, r#"{"detail": "Faltan credenciales."}"#);
        assert_eq!(login_error_message(&err), "Faltan credenciales.");
    }
}
