//! Global notification overlay.

use leptos::prelude::*;

use crate::state::toast::ToastState;

/// How long a toast stays visible before expiring on its own.
#[cfg(feature = "hydrate")]
const TOAST_TTL_MS: u32 = 5_000;

/// Renders the toast queue in a fixed overlay. Each toast expires after a
/// few seconds or when its close button is clicked, whichever comes first.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-host">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    #[cfg(feature = "hydrate")]
                    leptos::task::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
                        toasts.update(|t| t.dismiss(id));
                    });

                    view! {
                        <div class=toast.kind.css_class()>
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="toast__close"
                                on:click=move |_| toasts.update(|t| t.dismiss(id))
                            >
                                "\u{00d7}"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
