use crate::dashboards::goal_stats::GoalStatsPage;
use crate::domain::goal::ui::list::GoalList;
use leptos::prelude::*;

/// Top-level pages. Plain signal navigation, no router.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Goals,
    Dashboard,
}

#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::Goals);

    let nav_class = move |p: Page| {
        if page.get() == p {
            "nav__link nav__link--active"
        } else {
            "nav__link"
        }
    };

    view! {
        <div class="app">
            <nav class="nav">
                <span class="nav__brand">{"Goal Tracker"}</span>
                <button class=move || nav_class(Page::Goals) on:click=move |_| set_page.set(Page::Goals)>
                    {"Goals"}
                </button>
                <button class=move || nav_class(Page::Dashboard) on:click=move |_| set_page.set(Page::Dashboard)>
                    {"Dashboard"}
                </button>
            </nav>
            {move || match page.get() {
                Page::Goals => view! { <GoalList /> }.into_any(),
                Page::Dashboard => view! { <GoalStatsPage /> }.into_any(),
            }}
        </div>
    }
}
