use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{RequestCache, RequestInit, Response, Window};

use reveal_engine::{AssetRequest, AssetResponse, RevealError};

use crate::dom::host_error;

/// Perform the request once and collect its status and body.
///
/// The body is only read for successful responses. No abort signal: a hung
/// request keeps the page waiting.
pub async fn fetch_asset(window: &Window, request: &AssetRequest) -> Result<AssetResponse, RevealError> {
    let init = RequestInit::new();
    init.set_cache(RequestCache::NoStore);

    let promise = window.fetch_with_str_and_init(&request.path, &init);
    let response: Response = JsFuture::from(promise)
        .await
        .map_err(host_error)?
        .dyn_into()
        .map_err(host_error)?;

    if !response.ok() {
        return Ok(AssetResponse::new(response.status(), String::new()));
    }

    let text = JsFuture::from(response.text().map_err(host_error)?)
        .await
        .map_err(host_error)?
        .as_string()
        .ok_or_else(|| RevealError::Host("response body is not text".to_string()))?;
    Ok(AssetResponse::new(response.status(), text))
}
