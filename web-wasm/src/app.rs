//! メインアプリケーションコンポーネント

use crate::api;
use crate::components::{
    action_buttons::ActionButtons,
    analyzing::AnalyzingIndicator,
    header::Header,
    result_panel::ResultPanel,
    selected_file::{SelectedFile, SelectedInfo},
    toast_list::ToastList,
    upload_area::UploadArea,
};
use crate::config;
use crate::download;
use crate::toast::ToastSink;
use blueprint_measure_common::response::DEFAULT_TIMEOUT_SECS;
use blueprint_measure_common::{
    download_artifact, present, CandidateFile, Phase, SessionController,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

/// ブラウザ側のセッション（候補ファイルは `web_sys::File` のまま保持）
pub type BrowserSession = SessionController<File, ToastSink>;

#[component]
pub fn App() -> impl IntoView {
    let toasts = ToastSink::new();
    // File は Send でないのでローカルストレージのシグナルに置く
    let session = RwSignal::new_local(BrowserSession::new(toasts));
    let backend_url = StoredValue::new(config::backend_url());

    let phase = Memo::new(move |_| session.with(|s| s.phase()));
    let accepts_selection = move || session.with(|s| s.accepts_selection());
    let selected = Memo::new(move |_| {
        session.with(|s| s.candidate().map(SelectedInfo::of))
    });
    let result_view = Memo::new(move |_| session.with(|s| s.result().map(present)));

    // ファイル選択（ピッカー / ドロップ共通）
    let on_select = move |file: File| {
        let candidate = CandidateFile::with_handle(
            file.name(),
            file.type_(),
            file.size() as u64,
            file,
        );
        session.update(|s| {
            s.select(candidate);
        });
    };

    // 解析開始
    let on_analyze = move |_: ()| {
        let Some(ticket) = session.try_update(|s| s.begin_submit()).flatten() else {
            return;
        };
        let base_url = backend_url.get_value();

        spawn_local(async move {
            let outcome =
                api::analyze_blueprint(&base_url, &ticket.file.handle, DEFAULT_TIMEOUT_SECS).await;
            session.update(|s| {
                s.complete(ticket.id, outcome);
            });
        });
    };

    let on_start_over = move |_: ()| {
        session.update(|s| {
            s.start_over();
        });
    };

    let on_download = move |_: ()| {
        let artifact = session.with_untracked(|s| s.result().map(download_artifact));
        if let Some(artifact) = artifact {
            if let Err(e) = download::trigger_download(&artifact) {
                tracing::warn!(?e, file = %artifact.file_name, "download failed");
            }
        }
    };

    view! {
        <div class="container">
            <Header />
            <ToastList toasts=toasts />

            <Show when=accepts_selection>
                <UploadArea on_select=on_select />
            </Show>

            <SelectedFile file=selected />

            <ActionButtons
                phase=phase
                on_analyze=on_analyze
                on_start_over=on_start_over
            />

            <Show when=move || phase.get() == Phase::Analyzing>
                <AnalyzingIndicator />
            </Show>

            {move || {
                result_view
                    .get()
                    .map(|result| view! { <ResultPanel result=result on_download=on_download /> })
            }}
        </div>
    }
}
