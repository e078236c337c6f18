use super::view_model::GoalDetailsViewModel;
use crate::shared::date_utils::{deadline_label, format_timestamp};
use leptos::prelude::*;
use std::sync::Arc;

#[component]
pub fn GoalDetails(
    id: Option<String>,
    /// Called after any successful mutation (create, finish, discard, delete)
    on_saved: Arc<dyn Fn(()) + Send + Sync>,
    on_cancel: Arc<dyn Fn(()) + Send + Sync>,
) -> impl IntoView {
    let vm = GoalDetailsViewModel::new();
    let is_detail = id.is_some();
    vm.load_if_needed(id);

    let vm_clone = vm.clone();

    view! {
        <div class="details-container goal-details">
            <div class="details-header">
                <h3>{if is_detail { "Goal details" } else { "New goal" }}</h3>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            {if is_detail {
                detail_body(vm_clone, on_saved, on_cancel).into_any()
            } else {
                create_form(vm_clone, on_saved, on_cancel).into_any()
            }}
        </div>
    }
}

fn detail_body(
    vm: GoalDetailsViewModel,
    on_changed: Arc<dyn Fn(()) + Send + Sync>,
    on_cancel: Arc<dyn Fn(()) + Send + Sync>,
) -> impl IntoView {
    let vm_actions = vm.clone();

    view! {
        {
            let vm = vm.clone();
            move || vm.existing.get().map(|goal| {
                let status = goal.status.as_str();
                view! {
                    <div class="details-view">
                        <div class="details-row">
                            <span class="details-label">{"Name"}</span>
                            <span>{goal.goal_name.clone()}</span>
                        </div>
                        <div class="details-row">
                            <span class="details-label">{"Description"}</span>
                            <span>{goal.goal_description.clone()}</span>
                        </div>
                        <div class="details-row">
                            <span class="details-label">{"Deadline"}</span>
                            <span>{deadline_label(&goal)}</span>
                        </div>
                        <div class="details-row">
                            <span class="details-label">{"Status"}</span>
                            <span class=format!("badge badge--{}", status)>{status}</span>
                        </div>
                        <div class="details-row">
                            <span class="details-label">{"Created"}</span>
                            <span>{format_timestamp(goal.metadata.created_at)}</span>
                        </div>
                    </div>
                }
            })
        }

        <div class="details-actions">
            <button
                class="btn btn-primary"
                on:click={
                    let vm = vm_actions.clone();
                    let cb = on_changed.clone();
                    move |_| vm.finish_command(cb.clone())
                }
            >
                {"Finish"}
            </button>
            <button
                class="btn btn-secondary"
                on:click={
                    let vm = vm_actions.clone();
                    let cb = on_changed.clone();
                    move |_| vm.discard_command(cb.clone())
                }
            >
                {"Discard"}
            </button>
            <button
                class="btn btn-danger"
                on:click={
                    let vm = vm_actions.clone();
                    let cb = on_changed.clone();
                    move |_| {
                        let confirmed = web_sys::window()
                            .map(|w| {
                                w.confirm_with_message("Delete this goal permanently?")
                                    .unwrap_or(false)
                            })
                            .unwrap_or(false);
                        if confirmed {
                            vm.delete_command(cb.clone());
                        }
                    }
                }
            >
                {"Delete"}
            </button>
            <button
                class="btn"
                on:click={
                    let cb = on_cancel.clone();
                    move |_| (cb)(())
                }
            >
                {"Close"}
            </button>
        </div>
    }
}

fn create_form(
    vm: GoalDetailsViewModel,
    on_saved: Arc<dyn Fn(()) + Send + Sync>,
    on_cancel: Arc<dyn Fn(()) + Send + Sync>,
) -> impl IntoView {
    let vm_clone = vm.clone();

    view! {
        <div class="details-form">
            <div class="form-group">
                <label for="goal_name">{"Name"}</label>
                <input
                    type="text"
                    id="goal_name"
                    prop:value={
                        let vm = vm_clone.clone();
                        move || vm.form.get().goal_name
                    }
                    on:input={
                        let vm = vm_clone.clone();
                        move |ev| {
                            vm.form.update(|f| f.goal_name = event_target_value(&ev));
                        }
                    }
                    placeholder="What do you want to achieve?"
                />
            </div>

            <div class="form-group">
                <label for="goal_description">{"Description"}</label>
                <textarea
                    id="goal_description"
                    prop:value={
                        let vm = vm_clone.clone();
                        move || vm.form.get().goal_description
                    }
                    on:input={
                        let vm = vm_clone.clone();
                        move |ev| {
                            vm.form.update(|f| f.goal_description = event_target_value(&ev));
                        }
                    }
                    placeholder="Describe the goal"
                    rows="3"
                />
            </div>

            <div class="form-group">
                <label for="goal_end_date">{"End date"}</label>
                <input
                    type="datetime-local"
                    id="goal_end_date"
                    prop:value={
                        let vm = vm_clone.clone();
                        move || vm.form.get().end_date_local
                    }
                    on:input={
                        let vm = vm_clone.clone();
                        move |ev| {
                            vm.form.update(|f| f.end_date_local = event_target_value(&ev));
                        }
                    }
                />
            </div>
        </div>

        <div class="details-actions">
            <button
                class="btn btn-primary"
                on:click={
                    let vm = vm_clone.clone();
                    let on_saved = on_saved.clone();
                    move |_| vm.save_command(on_saved.clone())
                }
                disabled={
                    let vm = vm_clone.clone();
                    move || !vm.is_form_valid()()
                }
            >
                {"Save"}
            </button>
            <button
                class="btn"
                on:click={
                    let cb = on_cancel.clone();
                    move |_| (cb)(())
                }
            >
                {"Cancel"}
            </button>
        </div>
    }
}
