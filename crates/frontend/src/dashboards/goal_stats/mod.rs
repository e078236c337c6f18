//! Status breakdown dashboard for goals

use crate::shared::api_utils::send_request;
use crate::shared::components::stat_card::StatCard;
use contracts::domain::goal::stats::GoalStats;
use leptos::prelude::*;

#[component]
pub fn GoalStatsPage() -> impl IntoView {
    let (stats, set_stats) = signal(None::<GoalStats>);
    let (error, set_error) = signal(None::<String>);

    let fetch = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match send_request("GET", "/api/goal/stats", None).await {
                Ok(text) => match serde_json::from_str::<GoalStats>(&text) {
                    Ok(s) => {
                        set_error.set(None);
                        set_stats.set(Some(s));
                    }
                    Err(e) => set_error.set(Some(format!("Failed to parse stats: {}", e))),
                },
                Err(e) => set_error.set(Some(format!("Failed to load stats: {}", e))),
            }
        });
    };

    fetch();

    let total = Signal::derive(move || stats.get().map(|s| s.total));
    let active = Signal::derive(move || stats.get().map(|s| s.active));
    let finished = Signal::derive(move || stats.get().map(|s| s.finished));
    let discarded = Signal::derive(move || stats.get().map(|s| s.discarded));

    view! {
        <div class="page dashboard">
            <div class="page-header">
                <h2>{"Dashboard"}</h2>
                <div class="page-header__actions">
                    <button class="btn" on:click=move |_| fetch()>
                        {"Refresh"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

            <div class="stat-cards">
                <StatCard label="Total".to_string() value=total />
                <StatCard label="Active".to_string() value=active />
                <StatCard label="Finished".to_string() value=finished modifier="stat-card--success" />
                <StatCard label="Discarded".to_string() value=discarded modifier="stat-card--error" />
            </div>

            {move || {
                stats.get().map(|s| {
                    let segments = [
                        ("active", s.active, s.percent(s.active)),
                        ("finished", s.finished, s.percent(s.finished)),
                        ("discarded", s.discarded, s.percent(s.discarded)),
                    ];
                    view! {
                        <div class="status-bar">
                            {segments
                                .into_iter()
                                .filter(|(_, count, _)| *count > 0)
                                .map(|(name, count, pct)| {
                                    view! {
                                        <div
                                            class=format!("status-bar__segment status-bar__segment--{}", name)
                                            style=format!("width: {}%", pct)
                                            title=format!("{}: {}", name, count)
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
            }}
        </div>
    }
}
