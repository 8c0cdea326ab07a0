//! Dashboard page: aggregate counts and the top patents by related records.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::collections::HashMap;

use leptos::prelude::*;

use crate::net::api::Api;
use crate::net::types::DashboardSummary;
use crate::state::stage::{STAGE_COUNT, Stage};

/// Densify the backend's sparse stage histogram. Keys are stage indices as
/// strings; unknown or out-of-range keys are dropped.
fn stage_buckets(counts: &HashMap<String, i64>) -> [i64; STAGE_COUNT as usize] {
    let mut buckets = [0_i64; STAGE_COUNT as usize];
    for (key, count) in counts {
        if let Some(stage) = key.parse::<i64>().ok().and_then(Stage::from_record) {
            buckets[stage.index() as usize] += count;
        }
    }
    buckets
}

/// Dashboard page showing workflow totals, the stage histogram, and the
/// patents with the most related records.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = expect_context::<Api>();

    let summary = LocalResource::new(move || async move {
        api.fetch_dashboard_summary().await.unwrap_or_default()
    });

    view! {
        <div class="dashboard-page">
            <h1>"Dashboard"</h1>

            <Suspense fallback=move || view! { <p>"Loading summary..."</p> }>
                {move || summary.get().map(|s| view! { <SummaryPanels summary=s/> })}
            </Suspense>
        </div>
    }
}

#[component]
fn SummaryPanels(summary: DashboardSummary) -> impl IntoView {
    let buckets = stage_buckets(&summary.steps_counts);

    view! {
        <div class="dashboard-page__panels">
            <section class="summary-card">
                <h2>"Patents"</h2>
                <span class="summary-card__value">{summary.total_user_patents}</span>
            </section>
            <section class="summary-card">
                <h2>"Related records"</h2>
                <span class="summary-card__value">{summary.total_related_patents}</span>
            </section>

            <section class="dashboard-page__histogram">
                <h2>"Patents per stage"</h2>
                <ul>
                    {Stage::ALL
                        .into_iter()
                        .map(|at| {
                            let count = buckets[at.index() as usize];
                            view! {
                                <li class="histogram-row">
                                    <span class="histogram-row__label">{at.label()}</span>
                                    <span class="histogram-row__count">{count}</span>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()}
                </ul>
            </section>

            <section class="dashboard-page__top">
                <h2>"Most related records"</h2>
                {if summary.top_user_patents.is_empty() {
                    view! { <p>"No patents with related records yet."</p> }.into_any()
                } else {
                    view! {
                        <ul>
                            {summary
                                .top_user_patents
                                .into_iter()
                                .map(|p| {
                                    let stage_label = Stage::from_record(p.stage)
                                        .unwrap_or(Stage::FIRST)
                                        .label();
                                    view! {
                                        <li class="top-row">
                                            <span class="top-row__title">{p.title}</span>
                                            <span class="top-row__stage">{stage_label}</span>
                                            <span class="top-row__count">{p.related_count}</span>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    }
                        .into_any()
                }}
            </section>
        </div>
    }
}
