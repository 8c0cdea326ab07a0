//! Role-gated route wrapper.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::roles::{AccessDecision, Role, authorize};
use crate::state::session::SessionState;

/// Renders its children only when the session passes `authorize` for the
/// given roles; otherwise redirects to `/login` or `/403`. Guarded content is
/// withheld from the DOM, not merely hidden, so nothing leaks while the
/// redirect effect runs.
#[component]
pub fn RequireRoles(allowed: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        let state = session.get();
        authorize(state.is_authenticated(), state.role(), &allowed)
    });

    Effect::new(move || match decision.get() {
        AccessDecision::Allow => {}
        AccessDecision::RedirectToLogin => navigate("/login", NavigateOptions::default()),
        AccessDecision::RedirectToForbidden => navigate("/403", NavigateOptions::default()),
    });

    view! {
        <Show when=move || decision.get() == AccessDecision::Allow>
            {children()}
        </Show>
    }
}
