//! Forbidden page shown when a role check fails.

use leptos::prelude::*;

/// Access-denied page. Reached by redirect from `RequireRoles`.
#[component]
pub fn ForbiddenPage() -> impl IntoView {
    view! {
        <div class="forbidden-page">
            <h1>"403"</h1>
            <p>"Your account does not have access to this page."</p>
            <a href="/patent-list" class="btn">
                "Back to patents"
            </a>
        </div>
    }
}
