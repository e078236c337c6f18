//! Goal list page with a slide-in details panel

use crate::domain::goal::ui::details::GoalDetails;
use crate::shared::api_utils::send_request;
use crate::shared::date_utils::{deadline_label, format_timestamp};
use contracts::domain::goal::aggregate::Goal;
use leptos::prelude::*;
use std::sync::Arc;

/// Flat row projection of a [`Goal`] for table rendering
#[derive(Clone, PartialEq)]
pub struct GoalRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub deadline: String,
    pub status: String,
    pub created_at: String,
}

impl From<Goal> for GoalRow {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.to_string_id(),
            deadline: deadline_label(&goal),
            status: goal.status.as_str().to_string(),
            created_at: format_timestamp(goal.metadata.created_at),
            name: goal.goal_name,
            description: goal.goal_description,
        }
    }
}

/// Which side panel is open, if any
#[derive(Clone, PartialEq)]
enum Panel {
    None,
    New,
    Details(String),
}

#[component]
pub fn GoalList() -> impl IntoView {
    let (items, set_items) = signal(Vec::<GoalRow>::new());
    let (error, set_error) = signal(None::<String>);
    let (panel, set_panel) = signal(Panel::None);

    let fetch = move || {
        wasm_bindgen_futures::spawn_local(async move {
            match send_request("GET", "/api/", None).await {
                Ok(text) => match serde_json::from_str::<Vec<Goal>>(&text) {
                    Ok(goals) => {
                        set_error.set(None);
                        set_items.set(goals.into_iter().map(GoalRow::from).collect());
                    }
                    Err(e) => set_error.set(Some(format!("Failed to parse goals: {}", e))),
                },
                Err(e) => set_error.set(Some(format!("Failed to load goals: {}", e))),
            }
        });
    };

    fetch();

    let close_and_refresh = Arc::new(move |_: ()| {
        set_panel.set(Panel::None);
        fetch();
    });
    let close = Arc::new(move |_: ()| set_panel.set(Panel::None));

    let lifecycle = move |method: &'static str, path: String| {
        wasm_bindgen_futures::spawn_local(async move {
            match send_request(method, &path, None).await {
                Ok(_) => {
                    set_error.set(None);
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="page goal-list">
            <div class="page-header">
                <h2>{"Goals"}</h2>
                <div class="page-header__actions">
                    <button class="btn btn-primary" on:click=move |_| set_panel.set(Panel::New)>
                        {"New goal"}
                    </button>
                    <button class="btn" on:click=move |_| fetch()>
                        {"Refresh"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Description"}</th>
                        <th>{"Deadline"}</th>
                        <th>{"Status"}</th>
                        <th>{"Created"}</th>
                        <th>{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || items.get()
                        key=|row| row.id.clone()
                        children=move |row: GoalRow| {
                            let row_id = row.id.clone();
                            let finish_id = row.id.clone();
                            let discard_id = row.id.clone();
                            let delete_id = row.id.clone();
                            view! {
                                <tr
                                    class="data-table__row"
                                    on:click=move |_| set_panel.set(Panel::Details(row_id.clone()))
                                >
                                    <td>{row.name}</td>
                                    <td>{row.description}</td>
                                    <td>{row.deadline}</td>
                                    <td>
                                        <span class=format!("badge badge--{}", row.status)>
                                            {row.status.clone()}
                                        </span>
                                    </td>
                                    <td>{row.created_at}</td>
                                    <td class="data-table__actions">
                                        <button
                                            class="btn btn-small"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                lifecycle("PATCH", format!("/finish_goal/{}", finish_id));
                                            }
                                        >
                                            {"Finish"}
                                        </button>
                                        <button
                                            class="btn btn-small"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                lifecycle("PATCH", format!("/discard_goal/{}", discard_id));
                                            }
                                        >
                                            {"Discard"}
                                        </button>
                                        <button
                                            class="btn btn-small btn-danger"
                                            on:click=move |ev| {
                                                ev.stop_propagation();
                                                let confirmed = web_sys::window()
                                                    .map(|w| {
                                                        w.confirm_with_message("Delete this goal permanently?")
                                                            .unwrap_or(false)
                                                    })
                                                    .unwrap_or(false);
                                                if confirmed {
                                                    lifecycle("DELETE", format!("/delete_goal/{}", delete_id));
                                                }
                                            }
                                        >
                                            {"Delete"}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            {move || {
                let on_saved = close_and_refresh.clone();
                let on_cancel = close.clone();
                match panel.get() {
                    Panel::None => ().into_any(),
                    Panel::New => view! {
                        <GoalDetails id=None on_saved=on_saved on_cancel=on_cancel />
                    }
                    .into_any(),
                    Panel::Details(id) => view! {
                        <GoalDetails id=Some(id) on_saved=on_saved on_cancel=on_cancel />
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}
