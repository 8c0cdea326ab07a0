//! Account provisioning page (admin only).
//!
//! Registration creates an account for someone else; the admin's own session
//! is left untouched.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::net::api::Api;
#[cfg(feature = "hydrate")]
use crate::net::types::RegisterRequest;
use crate::state::roles::Role;
use crate::state::toast::ToastState;

#[cfg(any(test, feature = "hydrate"))]
const MIN_PASSWORD_LEN: usize = 6;

/// Loose plausibility check, not RFC validation. The backend has the final
/// word; this only catches obvious typos before a round-trip.
#[cfg(any(test, feature = "hydrate"))]
fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(any(test, feature = "hydrate"))]
fn registration_error(name: &str, email: &str, password: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some("Name is required.");
    }
    if !is_plausible_email(email) {
        return Some("Enter a valid email address.");
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Some("Password must be at least 6 characters.");
    }
    None
}

/// Account provisioning form with a role selector.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::User.as_str().to_owned());
    let error = RwSignal::new(Option::<String>::None);
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |(): ()| {
        if busy.get_untracked() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let request = RegisterRequest {
                name: name.get_untracked().trim().to_owned(),
                email: email.get_untracked().trim().to_owned(),
                password: password.get_untracked(),
                role: role.get_untracked(),
            };
            if let Some(message) =
                registration_error(&request.name, &request.email, &request.password)
            {
                error.set(Some(message.to_owned()));
                return;
            }
            busy.set(true);
            error.set(None);
            leptos::task::spawn_local(async move {
                match api.register(&request).await {
                    Ok(created) => {
                        let who = created.email.or(created.name).unwrap_or_default();
                        toasts.update(|t| {
                            t.success(format!("Account created for {who}."));
                        });
                        name.set(String::new());
                        email.set(String::new());
                        password.set(String::new());
                        role.set(Role::User.as_str().to_owned());
                    }
                    Err(err) => error.set(Some(err.message)),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (api, toasts);
        }
    });

    view! {
        <div class="register-page">
            <h1>"New account"</h1>

            <div class="register-form">
                <label class="register-form__label">
                    "Name"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="register-form__label">
                    "Email"
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="register-form__label">
                    "Password"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="register-form__label">
                    "Role"
                    <select on:change=move |ev| role.set(event_target_value(&ev))>
                        <option value="user" selected=move || role.get() == "user">
                            "User"
                        </option>
                        <option value="admin" selected=move || role.get() == "admin">
                            "Admin"
                        </option>
                        <option value="viewer" selected=move || role.get() == "viewer">
                            "Viewer"
                        </option>
                    </select>
                </label>

                <Show when=move || error.get().is_some()>
                    <p class="register-form__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <button
                    class="btn btn--primary"
                    disabled=move || busy.get()
                    on:click=move |_| submit.run(())
                >
                    {move || if busy.get() { "Creating..." } else { "Create account" }}
                </button>
            </div>
        </div>
    }
}
