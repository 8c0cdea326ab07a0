//! Stage timeline dialog for one patent.
//!
//! DESIGN
//! ======
//! Every user action is checked against the pure `StageMachine` before any
//! backend call; a rejected action never leaves the client. Stage advances
//! apply optimistically and the refetched record is adopted as the source of
//! truth. All async completions carry the tracker's request generation so a
//! response from a superseded load can never overwrite the visible record.

use leptos::prelude::*;

use crate::net::api::Api;
use crate::state::session::SessionState;
use crate::state::stage::{STAGE_COUNT, Stage, StageAction};
use crate::state::tracker::TrackerState;

#[cfg(feature = "hydrate")]
async fn refresh_patent(api: Api, tracker: RwSignal<TrackerState>, patent_id: i64, generation: u64) {
    if let Ok(patent) = api.fetch_patent(patent_id).await {
        tracker.update(|t| {
            t.try_adopt(generation, patent);
        });
    }
}

/// Probe the attachment URL of every form-bearing stage the patent has
/// reached. Probes run after the record is adopted so the current stage is
/// known.
#[cfg(feature = "hydrate")]
async fn probe_attachments(api: Api, tracker: RwSignal<TrackerState>, patent_id: i64, generation: u64) {
    let current = tracker.with_untracked(|t| t.machine.current());
    for at in Stage::ALL {
        if at.has_form() && at <= current {
            let url = api.fetch_stage_attachment_url(patent_id, at).await;
            tracker.update(|t| t.set_attachment_url(generation, at, url));
        }
    }
}

/// Modal dialog showing a patent's six workflow stages, the similarity
/// search, and the related records found by it.
#[component]
pub fn PatentTimeline(
    patent_id: i64,
    tracker: RwSignal<TrackerState>,
    on_close: Callback<()>,
) -> impl IntoView {
    let api = expect_context::<Api>();
    let session = expect_context::<RwSignal<SessionState>>();
    let toasts = api.toasts;

    let view_only = Memo::new(move |_| session.get().is_view_only());

    let file_inputs: [NodeRef<leptos::html::Input>; STAGE_COUNT as usize] =
        std::array::from_fn(|_| NodeRef::new());

    #[cfg(feature = "hydrate")]
    {
        let generation = tracker.try_update(TrackerState::begin_load).unwrap_or_default();
        leptos::task::spawn_local(async move {
            refresh_patent(api, tracker, patent_id, generation).await;
            probe_attachments(api, tracker, patent_id, generation).await;
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = patent_id;

    let on_finalize = Callback::new(move |at: Stage| {
        let machine = tracker.with_untracked(|t| t.machine);
        let next = match machine.apply(StageAction::Finalize { at }) {
            Ok(next) => next,
            Err(rejected) => {
                toasts.update(|t| {
                    t.error(rejected.to_string());
                });
                return;
            }
        };

        #[cfg(feature = "hydrate")]
        {
            let generation = tracker.with_untracked(TrackerState::generation);
            // Optimistic advance; the refetched record wins either way.
            tracker.update(|t| {
                t.machine = next;
                t.finalize_busy = true;
            });
            leptos::task::spawn_local(async move {
                match api.update_patent_stage(patent_id, next.current()).await {
                    Ok(patent) => {
                        tracker.update(|t| {
                            t.try_adopt(generation, patent);
                        });
                        toasts.update(|t| {
                            t.success(format!("{} completed.", at.label()));
                        });
                    }
                    Err(_) => {
                        // The gateway already surfaced the failure; resync.
                        refresh_patent(api, tracker, patent_id, generation).await;
                    }
                }
                tracker.update(|t| t.finalize_busy = false);
                probe_attachments(api, tracker, patent_id, generation).await;
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = next;
        }
    });

    let on_toggle_edit = Callback::new(move |at: Stage| {
        tracker.update(|t| {
            let action = if t.machine.edit_stage() == Some(at) {
                StageAction::ExitEdit
            } else {
                StageAction::EnterEdit { at }
            };
            if let Ok(next) = t.machine.apply(action) {
                t.machine = next;
            }
        });
    });

    let on_search = Callback::new(move |(): ()| {
        if !tracker.with_untracked(TrackerState::can_search) {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let generation = tracker.with_untracked(TrackerState::generation);
            let term = tracker.with_untracked(|t| t.search_term.trim().to_owned());
            tracker.update(|t| t.search_busy = true);
            leptos::task::spawn_local(async move {
                // Associations persist server-side; refetch to display them.
                if api.run_similarity_search(&term, patent_id).await.is_ok() {
                    refresh_patent(api, tracker, patent_id, generation).await;
                }
                tracker.update(|t| t.search_busy = false);
            });
        }
    });

    let on_save = Callback::new(move |at: Stage| {
        #[cfg(feature = "hydrate")]
        {
            let generation = tracker.with_untracked(TrackerState::generation);
            let notes = tracker.with_untracked(|t| t.form(at).notes.clone());
            let file = file_inputs[at.index() as usize]
                .get_untracked()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0));
            tracker.update(|t| t.form_mut(at).saving = true);
            leptos::task::spawn_local(async move {
                if api.save_stage_form(patent_id, at, &notes, file).await.is_ok() {
                    toasts.update(|t| {
                        t.success(format!("{} saved.", at.label()));
                    });
                    let url = api.fetch_stage_attachment_url(patent_id, at).await;
                    tracker.update(|t| t.set_attachment_url(generation, at, url));
                }
                tracker.update(|t| {
                    t.form_mut(at).saving = false;
                    t.form_mut(at).file_name = None;
                });
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = at;
        }
    });

    let title = move || {
        tracker
            .with(|t| t.patent.as_ref().map(|p| p.title.clone()))
            .unwrap_or_else(|| "Loading...".to_owned())
    };
    let search_visible =
        Memo::new(move |_| tracker.with(|t| t.patent.is_some() && t.machine.search_allowed()));
    let can_search =
        Memo::new(move |_| !view_only.get() && tracker.with(TrackerState::can_search));
    let related = move || tracker.with(|t| t.related().to_vec());
    let has_related = Memo::new(move |_| tracker.with(|t| !t.related().is_empty()));

    view! {
        <div class="timeline-backdrop" on:click=move |_| on_close.run(())>
            <div class="timeline" on:click=move |ev| ev.stop_propagation()>
                <header class="timeline__header">
                    <h2>{title}</h2>
                    <button class="timeline__close" on:click=move |_| on_close.run(())>
                        "\u{00d7}"
                    </button>
                </header>

                <Show when=move || search_visible.get() && !view_only.get()>
                    <section class="timeline__search">
                        <h3>"Similarity search"</h3>
                        <input
                            type="text"
                            placeholder="Search term"
                            prop:value=move || tracker.with(|t| t.search_term.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                tracker.update(|t| t.search_term = value);
                            }
                        />
                        <button
                            class="btn btn--primary"
                            disabled=move || !can_search.get()
                            on:click=move |_| on_search.run(())
                        >
                            {move || {
                                if tracker.with(|t| t.search_busy) { "Searching..." } else { "Search" }
                            }}
                        </button>
                    </section>
                </Show>

                <Show when=move || has_related.get()>
                    <section class="timeline__related">
                        <h3>"Similar patents"</h3>
                        <ul class="related-list">
                            <For
                                each=related
                                key=|r| r.id
                                children=move |r| {
                                    view! {
                                        <li class="related-list__item">
                                            {match r.detail_url.clone() {
                                                Some(url) => {
                                                    view! {
                                                        <a href=url target="_blank" rel="noreferrer">
                                                            {r.title.clone()}
                                                        </a>
                                                    }
                                                        .into_any()
                                                }
                                                None => view! { <span>{r.title.clone()}</span> }.into_any(),
                                            }}
                                            <span class="related-list__number">
                                                {r.application_number.clone()}
                                            </span>
                                            <span class="related-list__filer">
                                                {r.filer.clone().unwrap_or_default()}
                                            </span>
                                            <span class="related-list__inventors">
                                                {r.inventors.clone().unwrap_or_default()}
                                            </span>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    </section>
                </Show>

                <div class="timeline__stages">
                    {Stage::ALL
                        .into_iter()
                        .map(|at| {
                            view! {
                                <StageCard
                                    at=at
                                    tracker=tracker
                                    view_only=view_only
                                    on_finalize=on_finalize
                                    on_toggle_edit=on_toggle_edit
                                    on_save=on_save
                                    file_input=file_inputs[at.index() as usize]
                                />
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </div>
        </div>
    }
}

/// One stage card: label, status badge, and the notes + attachment form on
/// stages that carry one.
#[component]
fn StageCard(
    at: Stage,
    tracker: RwSignal<TrackerState>,
    view_only: Memo<bool>,
    on_finalize: Callback<Stage>,
    on_toggle_edit: Callback<Stage>,
    on_save: Callback<Stage>,
    file_input: NodeRef<leptos::html::Input>,
) -> impl IntoView {
    let machine = Memo::new(move |_| tracker.with(|t| t.machine));
    let editable = Memo::new(move |_| machine.get().is_editable(at, view_only.get()));
    let is_current = Memo::new(move |_| machine.get().current() == at);
    let editing = Memo::new(move |_| machine.get().edit_stage() == Some(at));
    let can_toggle_edit = Memo::new(move |_| {
        !view_only.get() && at != Stage::FIRST && machine.get().is_completed(at)
    });
    let finalize_busy = Memo::new(move |_| tracker.with(|t| t.finalize_busy));
    let saving = Memo::new(move |_| tracker.with(|t| t.form(at).saving));

    let status_label = move || {
        let m = machine.get();
        if at.is_last() && m.is_granted() {
            "Granted"
        } else if m.current() == at {
            "Current"
        } else if m.is_completed(at) {
            "Completed"
        } else {
            "Pending"
        }
    };

    let card_class = move || {
        let m = machine.get();
        let modifier = if m.current() == at {
            "current"
        } else if m.is_completed(at) {
            "completed"
        } else {
            "pending"
        };
        format!("stage-card stage-card--{modifier}")
    };

    let notes = move || tracker.with(|t| t.form(at).notes.clone());
    let attachment = move || tracker.with(|t| t.form(at).attachment_url.clone());
    let picked_file = move || tracker.with(|t| t.form(at).file_name.clone());

    view! {
        <section class=card_class>
            <header class="stage-card__header">
                <h3>{at.label()}</h3>
                <span class="stage-card__status">{status_label}</span>
            </header>

            <Show when=move || at.has_form()>
                <div class="stage-card__form">
                    <label class="stage-card__label">
                        "Notes"
                        <textarea
                            class="stage-card__notes"
                            prop:value=notes
                            disabled=move || !editable.get()
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                tracker.update(|t| t.form_mut(at).notes = value);
                            }
                        ></textarea>
                    </label>

                    <Show when=move || editable.get()>
                        <input
                            type="file"
                            class="stage-card__file"
                            node_ref=file_input
                            on:change=move |_| {
                                #[cfg(feature = "hydrate")]
                                {
                                    let name = file_input
                                        .get_untracked()
                                        .and_then(|input| input.files())
                                        .and_then(|files| files.get(0))
                                        .map(|file| file.name());
                                    tracker.update(|t| t.form_mut(at).file_name = name);
                                }
                            }
                        />
                        <Show when=move || picked_file().is_some()>
                            <span class="stage-card__picked">
                                {move || picked_file().unwrap_or_default()}
                            </span>
                        </Show>
                        <button
                            class="btn btn--primary"
                            disabled=move || saving.get()
                            on:click=move |_| on_save.run(at)
                        >
                            {move || if saving.get() { "Saving..." } else { "Save stage" }}
                        </button>
                    </Show>

                    <Show when=move || attachment().is_some()>
                        <a
                            class="stage-card__attachment"
                            href=move || attachment().unwrap_or_default()
                            target="_blank"
                            rel="noreferrer"
                        >
                            "View attachment"
                        </a>
                    </Show>
                </div>
            </Show>

            <div class="stage-card__actions">
                <Show when=move || can_toggle_edit.get()>
                    <button class="btn" on:click=move |_| on_toggle_edit.run(at)>
                        {move || if editing.get() { "Done editing" } else { "Edit" }}
                    </button>
                </Show>
                <Show when=move || is_current.get() && !view_only.get() && !at.is_last()>
                    <button
                        class="btn btn--primary"
                        disabled=move || finalize_busy.get()
                        on:click=move |_| on_finalize.run(at)
                    >
                        "Complete stage"
                    </button>
                </Show>
            </div>
        </section>
    }
}
