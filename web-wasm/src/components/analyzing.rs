//! 解析中インジケーター

use blueprint_measure_common::response::DEFAULT_TIMEOUT_SECS;
use leptos::prelude::*;

#[component]
pub fn AnalyzingIndicator() -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="spinner" />
            <p class="progress-text">
                {format!(
                    "Analyzing blueprint... this can take up to {} seconds",
                    DEFAULT_TIMEOUT_SECS
                )}
            </p>
        </div>
    }
}
