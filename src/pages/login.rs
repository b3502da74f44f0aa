//! Login page: email + password against `POST /login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
use leptos_router::components::A;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

#[cfg(feature = "csr")]
use crate::config::ClientConfig;
#[cfg(feature = "csr")]
use crate::net::api::ApiClient;
#[cfg(feature = "csr")]
use crate::net::transport::GlooTransport;
#[cfg(any(test, feature = "csr"))]
use crate::net::types::{access_token, error_detail};
use crate::routes::SIGNUP_PATH;
#[cfg(feature = "csr")]
use crate::routes::TASKS_PATH;
#[cfg(feature = "csr")]
use crate::state::auth::SessionStore;

#[cfg(any(test, feature = "csr"))]
const LOGIN_FAILED: &str = "Login failed.";

/// Trim the email and require both fields.
fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// The backend answers `{access_token}` on success and `{detail}` otherwise.
#[cfg(any(test, feature = "csr"))]
fn interpret_login_response(body: &serde_json::Value) -> Result<String, String> {
    match access_token(body) {
        Some(token) => Ok(token.to_owned()),
        None => Err(error_detail(body).unwrap_or_else(|| LOGIN_FAILED.to_owned())),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let auth = expect_context::<RwSignal<SessionStore>>();
    #[cfg(feature = "csr")]
    let config = expect_context::<ClientConfig>();
    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = validate_login_input(&email.get(), &password.get());
        let (email_value, password_value) = match input {
            Ok(input) => input,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let config = config.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let api = ApiClient::new(config, GlooTransport);
                let outcome = match api.login(&email_value, &password_value).await {
                    Ok(body) => interpret_login_response(&body),
                    Err(e) => Err(format!("{LOGIN_FAILED} {e}")),
                };
                match outcome {
                    Ok(token) => match auth.try_update(|store| store.set_token(token)) {
                        Some(Err(e)) => {
                            log::warn!("login: could not persist token: {e}");
                            info.set(format!("Signed in, but the session could not be saved: {e}"));
                        }
                        _ => {
                            info.set(String::new());
                            navigate(TASKS_PATH, NavigateOptions::default());
                        }
                    },
                    Err(msg) => info.set(msg),
                }
                password.set(String::new());
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("login: no browser transport, submission dropped");
            drop((email_value, password_value));
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Tasks"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "No account? "
                    <A href=SIGNUP_PATH>"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
