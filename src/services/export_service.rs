// ============================================================================
// EXPORT SERVICE - Save server-generated CSV through a temporary link
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use crate::dom::{create_element, document};
use crate::utils::constants::CSV_EXPORT_FILE_NAME;

const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Trigger a browser download of `bytes` as `purchase_requests.csv`
pub fn download_csv(bytes: &[u8]) -> Result<(), JsValue> {
    download(bytes, CSV_MIME, CSV_EXPORT_FILE_NAME)
}

fn download(bytes: &[u8], mime: &str, file_name: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));

    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    let body = document()
        .and_then(|doc| doc.body())
        .ok_or_else(|| JsValue::from_str("No document body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    Url::revoke_object_url(&url)?;
    log::info!("💾 [DASHBOARD] Saved {}", file_name);
    Ok(())
}
