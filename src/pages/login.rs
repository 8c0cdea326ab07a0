//! Sign-in page: credential form feeding the password-grant login.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::Api;
use crate::state::session::SessionState;

/// Local validation before any request goes out.
#[cfg(any(test, feature = "hydrate"))]
fn login_error(username: &str, password: &str) -> Option<&'static str> {
    if username.trim().is_empty() {
        return Some("Email is required.");
    }
    if password.is_empty() {
        return Some("Password is required.");
    }
    None
}

/// Sign-in page. On success the token and profile land in the session store
/// and the authenticated-redirect effect takes over.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let api = expect_context::<Api>();
    let navigate = use_navigate();

    Effect::new(move || {
        if session.get().is_authenticated() {
            navigate("/patent-list", NavigateOptions::default());
        }
    });

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let busy = RwSignal::new(false);

    let submit_blocked = move || {
        busy.get() || username.get().trim().is_empty() || password.get().is_empty()
    };

    let submit = Callback::new(move |(): ()| {
        if busy.get_untracked() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let user = username.get_untracked();
            let pass = password.get_untracked();
            if let Some(message) = login_error(&user, &pass) {
                error.set(Some(message.to_owned()));
                return;
            }
            busy.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                match api.login(&user, &pass).await {
                    Ok(token) => {
                        api.session.update(|s| s.set_token(Some(token.access_token)));
                        // Cache the profile before guarded views consult it.
                        if let Ok(profile) = api.fetch_profile().await {
                            api.session.update(|s| s.set_user(profile));
                        }
                        api.toasts.update(|t| {
                            t.success("Welcome back.");
                        });
                    }
                    Err(err) => {
                        let message = if err.is_unauthorized() {
                            "Invalid credentials.".to_owned()
                        } else {
                            err.message
                        };
                        error.set(Some(message));
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = api;
        }
    });

    view! {
        <div class="login-page">
            <h1>"Patent Workflow"</h1>
            <p>"Sign in to track your patent applications"</p>

            <div class="login-form">
                <label class="login-form__label">
                    "Email"
                    <input
                        type="email"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                </label>
                <label class="login-form__label">
                    "Password"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>

                <Show when=move || error.get().is_some()>
                    <p class="login-form__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <button
                    class="btn btn--primary"
                    disabled=submit_blocked
                    on:click=move |_| submit.run(())
                >
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </div>
        </div>
    }
}
