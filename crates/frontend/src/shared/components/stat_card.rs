use leptos::prelude::*;

fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('\u{00a0}');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: String,
    /// Count to display (None = loading/error)
    #[prop(into)]
    value: Signal<Option<i64>>,
    /// Extra modifier class, e.g. "stat-card--success"
    #[prop(optional)]
    modifier: &'static str,
) -> impl IntoView {
    let card_class = if modifier.is_empty() {
        "stat-card".to_string()
    } else {
        format!("stat-card {}", modifier)
    };

    let formatted = move || match value.get() {
        Some(v) => format_thousands(v),
        None => "\u{2014}".to_string(),
    };

    view! {
        <div class=card_class>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
            </div>
        </div>
    }
}
