//! 解析結果パネル

use blueprint_measure_common::presenter::{Badge, DimensionRow, EMPTY_STATE_MESSAGE};
use blueprint_measure_common::session::LIMITED_RESULT_MESSAGE;
use blueprint_measure_common::ResultView;
use leptos::prelude::*;

#[component]
pub fn ResultPanel<F>(result: ResultView, on_download: F) -> impl IntoView
where
    F: Fn(()) + Clone + Send + Sync + 'static,
{
    let scale_line = result.scale_line();
    let ResultView {
        filename,
        original_image,
        annotated_image,
        scale_confidence,
        rows,
        summary,
        notes,
        limited,
        ..
    } = result;

    let title = if filename.is_empty() {
        "Analysis Result".to_string()
    } else {
        format!("Analysis Result: {}", filename)
    };

    let dimensions = if rows.is_empty() {
        view! { <p class="empty-state">{EMPTY_STATE_MESSAGE}</p> }.into_any()
    } else {
        view! {
            <table class="dimension-table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Label"</th>
                        <th>"Value"</th>
                        <th>"Type"</th>
                        <th>"Confidence"</th>
                        <th>"Notes"</th>
                    </tr>
                </thead>
                <tbody>{rows.into_iter().map(dimension_row).collect_view()}</tbody>
            </table>
        }
        .into_any()
    };

    view! {
        <section class="result-panel">
            <h2>{title}</h2>

            {limited.then(|| view! { <p class="alert alert-warning">{LIMITED_RESULT_MESSAGE}</p> })}

            <div class="image-compare">
                <figure>
                    <img src=original_image.as_str().to_string() alt="Original blueprint" />
                    <figcaption>"Original"</figcaption>
                </figure>
                <figure>
                    <img src=annotated_image.as_str().to_string() alt="Annotated blueprint" />
                    <figcaption>"Annotated"</figcaption>
                </figure>
            </div>

            <div class="scale-line">
                <span>{scale_line}</span>
                {badge(scale_confidence)}
            </div>

            {dimensions}

            <p class="summary">{summary.to_string()}</p>

            {notes.map(|n| view! {
                <p class="notes">
                    <strong>"Notes: "</strong>
                    {n}
                </p>
            })}

            <button class="btn btn-secondary" on:click=move |_| on_download(())>
                "Download Annotated Image"
            </button>
        </section>
    }
}

fn dimension_row(row: DimensionRow) -> impl IntoView {
    view! {
        <tr>
            <td>{row.number}</td>
            <td>{row.label}</td>
            <td>{row.value}</td>
            <td>{badge(row.kind)}</td>
            <td>{badge(row.confidence)}</td>
            <td class="text-muted">{row.notes.unwrap_or_default()}</td>
        </tr>
    }
}

fn badge(badge: Badge) -> impl IntoView {
    view! { <span class=format!("badge {}", badge.tone.css_class())>{badge.text}</span> }
}
