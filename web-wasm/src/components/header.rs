//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Blueprint Measure"</h1>
            <p class="text-muted">"Upload an architectural blueprint to extract its dimensions"</p>
        </header>
    }
}
