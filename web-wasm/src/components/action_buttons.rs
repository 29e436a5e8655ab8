//! 解析・やり直しボタン

use blueprint_measure_common::Phase;
use leptos::prelude::*;

#[component]
pub fn ActionButtons<FA, FS>(
    phase: Memo<Phase>,
    on_analyze: FA,
    on_start_over: FS,
) -> impl IntoView
where
    FA: Fn(()) + Clone + Send + Sync + 'static,
    FS: Fn(()) + Clone + Send + Sync + 'static,
{
    let is_analyzing = move || phase.get() == Phase::Analyzing;

    view! {
        <div class="action-buttons">
            <Show when=move || phase.get() != Phase::Resolved>
                <button
                    class="btn btn-primary"
                    disabled=move || phase.get() != Phase::Ready
                    on:click={
                        let on_analyze = on_analyze.clone();
                        move |_| on_analyze(())
                    }
                >
                    {move || if is_analyzing() { "Analyzing..." } else { "Analyze Blueprint" }}
                </button>
            </Show>

            <Show when=move || phase.get() != Phase::Idle>
                <button
                    class="btn btn-secondary"
                    disabled=is_analyzing
                    on:click={
                        let on_start_over = on_start_over.clone();
                        move |_| on_start_over(())
                    }
                >
                    "Start Over"
                </button>
            </Show>
        </div>
    }
}
