//! 生成ファイルのダウンロード（Blob + 一時的な <a download>）

use bid_writer_common::workflow::{download_file_name, resolve_output_url};
use gloo::file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

use crate::api::ApiClient;

pub async fn download_output(client: &ApiClient, output_path: &str) -> Result<(), String> {
    let url = resolve_output_url(client.base_url(), output_path);
    let bytes = client.fetch_bytes(&url).await?;
    let file_name = download_file_name(output_path);
    save_bytes(&bytes, &file_name)?;
    log::info!("downloaded {} ({} bytes)", file_name, bytes.len());
    Ok(())
}

fn save_bytes(bytes: &[u8], file_name: &str) -> Result<(), String> {
    let object_url = ObjectUrl::from(Blob::new(bytes));
    let document = gloo::utils::document();
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "anchor element expected".to_string())?;
    anchor.set_href(&object_url);
    anchor.set_download(file_name);

    let body = gloo::utils::body();
    body.append_child(&anchor).map_err(|e| format!("{:?}", e))?;
    anchor.click();
    anchor.remove();
    Ok(())
}
