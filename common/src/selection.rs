//! ファイル選択アダプタ
//!
//! ファイル選択ダイアログとドラッグ&ドロップの2経路を
//! 「候補ファイルが1件届いた」に正規化する。ネットワークや結果には触れない。

/// ファイル選択ダイアログの結果から候補を1件取り出す
///
/// 空の選択（キャンセル）は `None`。
pub fn picker_selection<F>(files: impl IntoIterator<Item = F>) -> Option<F> {
    files.into_iter().next()
}

/// ドロップ領域の状態
///
/// `active` は表示用のフラグで、検証結果とは無関係。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    active: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn drag_enter(&mut self) {
        self.active = true;
    }

    pub fn drag_over(&mut self) {
        self.active = true;
    }

    pub fn drag_leave(&mut self) {
        self.active = false;
    }

    /// ドロップされたファイルの先頭のみ採用し、残りは黙って捨てる
    pub fn drop<F>(&mut self, files: impl IntoIterator<Item = F>) -> Option<F> {
        self.active = false;
        files.into_iter().next()
    }
}

/// ファイル名の拡張子から宣言MIMEタイプを決める
///
/// ブラウザのファイル選択が `File.type` を決めるのと同じく拡張子のみを見る。
pub fn declared_mime_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
