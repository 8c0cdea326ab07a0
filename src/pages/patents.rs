//! Patent list page with creation dialog and the stage timeline.

#[cfg(test)]
#[path = "patents_test.rs"]
mod patents_test;

use leptos::prelude::*;

use crate::components::timeline::PatentTimeline;
use crate::net::api::Api;
use crate::net::types::Patent;
use crate::state::session::SessionState;
use crate::state::stage::Stage;
use crate::state::toast::ToastState;
use crate::state::tracker::TrackerState;

#[cfg(any(test, feature = "hydrate"))]
fn new_patent_error(title: &str) -> Option<&'static str> {
    if title.trim().is_empty() {
        return Some("Title is required.");
    }
    None
}

/// Patent list: one card per patent, opening the timeline dialog on click.
#[component]
pub fn PatentsPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let session = expect_context::<RwSignal<SessionState>>();
    let view_only = Memo::new(move |_| session.get().is_view_only());

    let patents =
        LocalResource::new(move || async move { api.fetch_patents().await.unwrap_or_default() });

    let show_create = RwSignal::new(false);
    let selected = RwSignal::new(Option::<i64>::None);
    // Shared across dialog openings so request generations stay monotonic.
    let tracker = RwSignal::new(TrackerState::new());

    let on_close_dialog = Callback::new(move |(): ()| show_create.set(false));
    let on_close_timeline = Callback::new(move |(): ()| {
        selected.set(None);
        // A stage may have advanced while the timeline was open.
        patents.refetch();
    });

    view! {
        <div class="patents-page">
            <header class="patents-page__header">
                <h1>"My patents"</h1>
                <Show when=move || !view_only.get()>
                    <button class="btn btn--primary" on:click=move |_| show_create.set(true)>
                        "+ New patent"
                    </button>
                </Show>
            </header>

            <Suspense fallback=move || view! { <p>"Loading patents..."</p> }>
                {move || {
                    patents
                        .get()
                        .map(|list| {
                            if list.is_empty() {
                                view! {
                                    <p class="patents-page__empty">
                                        "No patents yet. Register the first one to start tracking."
                                    </p>
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <div class="patents-page__cards">
                                        {list
                                            .into_iter()
                                            .map(|p| {
                                                view! { <PatentCard patent=p selected=selected/> }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>

            <Show when=move || show_create.get()>
                <CreatePatentDialog on_cancel=on_close_dialog patents=patents/>
            </Show>

            {move || {
                selected
                    .get()
                    .map(|id| {
                        view! {
                            <PatentTimeline
                                patent_id=id
                                tracker=tracker
                                on_close=on_close_timeline
                            />
                        }
                    })
            }}
        </div>
    }
}

/// A clickable card for one patent in the list.
#[component]
fn PatentCard(patent: Patent, selected: RwSignal<Option<i64>>) -> impl IntoView {
    let id = patent.id;
    let stage_label = Stage::from_record(patent.stage).unwrap_or(Stage::FIRST).label();

    view! {
        <button class="patent-card" on:click=move |_| selected.set(Some(id))>
            <span class="patent-card__title">{patent.title}</span>
            <span class="patent-card__stage">{stage_label}</span>
            <span class="patent-card__description">
                {patent.description.unwrap_or_default()}
            </span>
        </button>
    }
}

/// Modal dialog for registering a new patent.
#[component]
fn CreatePatentDialog(on_cancel: Callback<()>, patents: LocalResource<Vec<Patent>>) -> impl IntoView {
    let api = expect_context::<Api>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let submit = Callback::new(move |(): ()| {
        #[cfg(feature = "hydrate")]
        {
            let new_title = title.get_untracked().trim().to_owned();
            if let Some(message) = new_patent_error(&new_title) {
                error.set(Some(message.to_owned()));
                return;
            }
            let new_description = description.get_untracked().trim().to_owned();
            leptos::task::spawn_local(async move {
                if api.create_patent(&new_title, &new_description).await.is_ok() {
                    toasts.update(|t| {
                        t.success("Patent registered.");
                    });
                    patents.refetch();
                    on_cancel.run(());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (api, toasts);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Register patent"</h2>
                <label class="dialog__label">
                    "Title"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>
                <label class="dialog__label">
                    "Description"
                    <textarea
                        class="dialog__input"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>

                <Show when=move || error.get().is_some()>
                    <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        "Register"
                    </button>
                </div>
            </div>
        </div>
    }
}
