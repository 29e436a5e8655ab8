//! トースト表示

use crate::toast::{Toast, ToastSink};
use leptos::prelude::*;

#[component]
pub fn ToastList(toasts: ToastSink) -> impl IntoView {
    let list = toasts.toasts();

    view! {
        <div class="toast-container">
            <For
                each=move || list.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast toast-{}", toast.kind.as_str())
                            on:click=move |_| toasts.dismiss(id)
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
