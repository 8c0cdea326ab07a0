//! Authenticated shell: top navigation wrapping each guarded page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::roles::Role;
use crate::state::session::SessionState;
use crate::state::toast::ToastState;

/// Navigation shell for signed-in views. Redirects to `/login` when the
/// session has no token, and refreshes the cached profile on mount so role
/// changes made server-side propagate without a re-login.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    {
        let navigate = navigate.clone();
        Effect::new(move || {
            if !session.get().is_authenticated() {
                navigate("/login", NavigateOptions::default());
            }
        });
    }

    #[cfg(feature = "hydrate")]
    {
        let api = expect_context::<crate::net::api::Api>();
        if session.get_untracked().is_authenticated() {
            leptos::task::spawn_local(async move {
                if let Ok(user) = api.fetch_profile().await {
                    session.update(|s| s.set_user(user));
                }
            });
        }
    }

    let is_admin = Memo::new(move |_| session.get().role() == Some(Role::Admin));

    let user_label = move || {
        let state = session.get();
        state
            .user
            .as_ref()
            .and_then(|u| u.name.clone().or_else(|| u.email.clone()))
            .unwrap_or_else(|| "Account".to_owned())
    };

    let toasts = expect_context::<RwSignal<ToastState>>();
    let on_logout = move |_| {
        session.update(SessionState::clear);
        toasts.update(|t| {
            t.info("Signed out.");
        });
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <div class="app-shell">
            <header class="app-shell__nav">
                <span class="app-shell__brand">"Patent Workflow"</span>
                <nav class="app-shell__links">
                    <a href="/patent-list">"Patents"</a>
                    <a href="/dashboard">"Dashboard"</a>
                    <Show when=move || is_admin.get()>
                        <a href="/register">"New account"</a>
                    </Show>
                </nav>
                <div class="app-shell__session">
                    <span class="app-shell__user">{user_label}</span>
                    <button class="btn" on:click=on_logout>
                        "Sign out"
                    </button>
                </div>
            </header>
            <main class="app-shell__content">{children()}</main>
        </div>
    }
}
