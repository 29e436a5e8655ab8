//! 選択中ファイルの表示

use blueprint_measure_common::CandidateFile;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedInfo {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl SelectedInfo {
    pub fn of<H>(file: &CandidateFile<H>) -> Self {
        Self {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.size_bytes,
        }
    }

    fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / (1024.0 * 1024.0))
    }
}

#[component]
pub fn SelectedFile(file: Memo<Option<SelectedInfo>>) -> impl IntoView {
    move || {
        file.get().map(|info| {
            let size = info.size_label();
            view! {
                <div class="selected-file">
                    <span class="file-icon">"📄"</span>
                    <span class="file-name">{info.name}</span>
                    <span class="text-muted">{format!("{} · {}", size, info.mime_type)}</span>
                </div>
            }
        })
    }
}
