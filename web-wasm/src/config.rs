//! バックエンドURLの解決（起動時に1回だけ）

/// ビルド時の `BLUEPRINT_BACKEND_URL`、なければページ自身のオリジン
pub fn backend_url() -> String {
    let url = option_env!("BLUEPRINT_BACKEND_URL")
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .or_else(page_origin)
        .unwrap_or_default();

    url.trim_end_matches('/').to_string()
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}
