//! 注記画像のダウンロード（aタグの download 属性）

use blueprint_measure_common::DownloadArtifact;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAnchorElement;

pub fn trigger_download(artifact: &DownloadArtifact) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("body is not available"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(artifact.data.as_str());
    anchor.set_download(&artifact.file_name);

    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    Ok(())
}
