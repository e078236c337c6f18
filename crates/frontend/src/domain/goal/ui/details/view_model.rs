use super::model;
use crate::shared::date_utils::parse_datetime_local;
use contracts::domain::goal::aggregate::{Goal, GoalDraft};
use leptos::prelude::*;
use std::sync::Arc;

/// Raw form state backing the create form
#[derive(Debug, Clone, Default)]
pub struct GoalForm {
    pub goal_name: String,
    pub goal_description: String,
    /// Value of the datetime-local input
    pub end_date_local: String,
}

/// ViewModel for the goal details panel.
///
/// Two modes: with an id the panel shows an existing goal and its lifecycle
/// actions; without one it is a creation form.
#[derive(Clone)]
pub struct GoalDetailsViewModel {
    pub form: RwSignal<GoalForm>,
    pub existing: RwSignal<Option<Goal>>,
    pub error: RwSignal<Option<String>>,
}

impl GoalDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(GoalForm::default()),
            existing: RwSignal::new(None),
            error: RwSignal::new(None),
        }
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || {
            let f = self.form.get();
            !f.goal_name.trim().is_empty()
                && !f.goal_description.trim().is_empty()
                && parse_datetime_local(&f.end_date_local).is_some()
        }
    }

    /// Load the goal from the server when an ID is provided
    pub fn load_if_needed(&self, id: Option<String>) {
        if let Some(existing_id) = id {
            let existing = self.existing;
            let error = self.error;
            wasm_bindgen_futures::spawn_local(async move {
                match model::fetch_by_id(&existing_id).await {
                    Ok(goal) => existing.set(Some(goal)),
                    Err(e) => error.set(Some(format!("Failed to load goal: {}", e))),
                }
            });
        }
    }

    /// Create the goal from the form state
    pub fn save_command(&self, on_saved: Arc<dyn Fn(()) + Send + Sync>) {
        let current = self.form.get();

        if current.goal_name.trim().is_empty() {
            self.error.set(Some("Goal name is required".to_string()));
            return;
        }
        if current.goal_description.trim().is_empty() {
            self.error
                .set(Some("Goal description is required".to_string()));
            return;
        }
        let Some(goal_end_date) = parse_datetime_local(&current.end_date_local) else {
            self.error.set(Some("Goal end date is required".to_string()));
            return;
        };

        let draft = GoalDraft {
            goal_name: current.goal_name,
            goal_description: current.goal_description,
            goal_end_date: Some(goal_end_date),
            resources_link: None,
        };

        let on_saved_cb = on_saved.clone();
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match model::create_goal(&draft).await {
                Ok(_) => (on_saved_cb)(()),
                Err(e) => error.set(Some(e)),
            }
        });
    }

    pub fn finish_command(&self, on_done: Arc<dyn Fn(()) + Send + Sync>) {
        let Some(id) = self.existing_id() else { return };
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match model::finish_goal(&id).await {
                Ok(()) => (on_done)(()),
                Err(e) => error.set(Some(e)),
            }
        });
    }

    pub fn discard_command(&self, on_done: Arc<dyn Fn(()) + Send + Sync>) {
        let Some(id) = self.existing_id() else { return };
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match model::discard_goal(&id).await {
                Ok(()) => (on_done)(()),
                Err(e) => error.set(Some(e)),
            }
        });
    }

    pub fn delete_command(&self, on_done: Arc<dyn Fn(()) + Send + Sync>) {
        let Some(id) = self.existing_id() else { return };
        let error = self.error;
        wasm_bindgen_futures::spawn_local(async move {
            match model::delete_goal(&id).await {
                Ok(()) => (on_done)(()),
                Err(e) => error.set(Some(e)),
            }
        });
    }

    fn existing_id(&self) -> Option<String> {
        self.existing.get().map(|goal| goal.to_string_id())
    }
}
