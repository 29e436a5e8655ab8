//! アップロードエリアコンポーネント
//!
//! ファイル選択ダイアログとドラッグ&ドロップのどちらも先頭1件だけを渡す。

use blueprint_measure_common::validator::ACCEPT_ATTRIBUTE;
use blueprint_measure_common::{picker_selection, DropZone};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, File, FileList, HtmlInputElement, MouseEvent};

#[component]
pub fn UploadArea<F>(on_select: F) -> impl IntoView
where
    F: Fn(File) + Clone + Send + Sync + 'static,
{
    let zone = RwSignal::new(DropZone::new());
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    let open_picker = move |_: MouseEvent| {
        if let Some(input) = file_input_ref.get() {
            input.click();
        }
    };

    let on_change = {
        let on_select = on_select.clone();
        move |ev: Event| {
            let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };

            if let Some(file) = input.files().and_then(|list| picker_selection(files_in(&list))) {
                on_select(file);
            }
            // 同じファイルを選び直せるようにリセット
            input.set_value("");
        }
    };

    let on_dragenter = move |ev: DragEvent| {
        ev.prevent_default();
        zone.update(|z| z.drag_enter());
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !zone.with_untracked(|z| z.is_active()) {
            zone.update(|z| z.drag_over());
        }
    };

    let on_dragleave = move |_: DragEvent| {
        zone.update(|z| z.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let files = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .map(|list| files_in(&list))
            .unwrap_or_default();

        if let Some(file) = zone.try_update(|z| z.drop(files)).flatten() {
            on_select(file);
        }
    };

    view! {
        <div
            class=move || {
                if zone.with(|z| z.is_active()) { "upload-area dragover" } else { "upload-area" }
            }
            on:click=open_picker
            on:dragenter=on_dragenter
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <input
                node_ref=file_input_ref
                type="file"
                accept=ACCEPT_ATTRIBUTE
                style="display:none"
                on:click=|ev: MouseEvent| ev.stop_propagation()
                on:change=on_change
            />
            <div class="upload-icon">"📐"</div>
            <p>"Drop a blueprint here or click to browse"</p>
            <p class="text-muted">"PDF, PNG or JPEG, up to 20 MB"</p>
        </div>
    }
}

fn files_in(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
