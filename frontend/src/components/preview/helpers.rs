//! Utility functions for the preview/editor component.
//!
//! Everything that touches the browser directly lives here: iframe loading
//! and serialization, `postMessage` plumbing, clipboard access, print and
//! download, plus the toast notifications used for user feedback throughout
//! `update.rs`. The update logic itself stays free of `web_sys` calls.

use gloo_net::http::Request;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAnchorElement, HtmlDocument, HtmlElement, HtmlIFrameElement, MessageEvent, Window};
use yew::prelude::*;

use common::messages::{WidgetRequest, WidgetResponse};
use common::model::document::Document;
use common::requests::{GenerateRequest, GeneratedPayload};

/// Rewrites the embedded document from `html`. A srcdoc assignment is a full
/// reload: transient DOM state and the editable flag of the previous
/// document are gone once the new one loads.
pub fn load_embedded(iframe_ref: &NodeRef, html: &str) {
    let Some(iframe) = iframe_ref.cast::<HtmlIFrameElement>() else {
        return;
    };
    iframe.set_srcdoc(html);
}

/// Serializes the live embedded document, edits and widget results included.
pub fn live_embedded_html(iframe_ref: &NodeRef) -> Option<String> {
    let iframe = iframe_ref.cast::<HtmlIFrameElement>()?;
    let document = iframe.content_document()?;
    document.document_element().map(|root| root.outer_html())
}

/// Turns on `designMode` in the embedded document and moves focus into it.
pub fn enable_embedded_editing(iframe_ref: &NodeRef) {
    let Some(iframe) = iframe_ref.cast::<HtmlIFrameElement>() else {
        return;
    };
    let Some(document) = iframe.content_document() else {
        return;
    };
    // designMode lives on HtmlDocument; the iframe document always is one.
    let document: HtmlDocument = document.unchecked_into();
    document.set_design_mode("on");
    if let Some(body) = document.body() {
        let _ = body.focus();
    }
}

/// True when `event` was posted by the window currently living in the
/// preview iframe. Messages from anything else, including a previous
/// incarnation of the iframe document, are discarded by the caller.
pub fn is_from_live_embedded(iframe_ref: &NodeRef, event: &MessageEvent) -> bool {
    let Some(iframe) = iframe_ref.cast::<HtmlIFrameElement>() else {
        return false;
    };
    let (Some(source), Some(live)) = (event.source(), iframe.content_window()) else {
        return false;
    };
    js_sys::Object::is(&source.into(), &live.into())
}

/// Extracts a `WidgetRequest` from a message event. Payloads that do not
/// match the schema (missing `type`, missing `uploaderId`) yield `None`.
pub fn widget_request_from_event(event: &MessageEvent) -> Option<WidgetRequest> {
    let json = js_sys::JSON::stringify(&event.data()).ok()?;
    let json = String::from(json);
    serde_json::from_str(&json).ok()
}

/// The content window a request should answer to, captured at request time.
/// Reloads may replace the embedded document afterwards; a late response
/// posted at the old window is inert because its target `uploaderId` no
/// longer exists anywhere.
pub fn embedded_window(iframe_ref: &NodeRef) -> Option<Window> {
    iframe_ref
        .cast::<HtmlIFrameElement>()
        .and_then(|iframe| iframe.content_window())
}

/// Posts a `WidgetResponse` into `target`, pinned to the host origin. The
/// embedded document is same-origin by construction (srcdoc), so no wildcard
/// is needed in this direction.
pub fn post_widget_response(target: Option<Window>, response: &WidgetResponse) {
    let Some(target) = target else {
        return;
    };
    let Ok(json) = serde_json::to_string(response) else {
        return;
    };
    let Ok(payload) = js_sys::JSON::parse(&json) else {
        return;
    };
    let origin = web_sys::window()
        .map(|w| w.origin())
        .unwrap_or_else(|| "*".to_string());
    if let Err(err) = target.post_message(&payload, &origin) {
        gloo_console::warn!("Gagal mengirim hasil ke pratinjau:", err);
    }
}

/// Performs the generation call for one widget request. Every failure path
/// collapses into the `error` response for the requesting widget; nothing
/// here can abort the preview session.
pub async fn request_generation(request: WidgetRequest) -> WidgetResponse {
    let url = match &request {
        WidgetRequest::GenerateImage { .. } => "/api/generate/image",
        WidgetRequest::GenerateDetailedPrompt { .. } => "/api/generate/prompt",
    };
    let body = GenerateRequest {
        description: request.description().to_string(),
    };

    let builder = match Request::post(url).json(&body) {
        Ok(builder) => builder,
        Err(err) => return WidgetResponse::error_for(&request, err.to_string()),
    };

    match builder.send().await {
        Ok(response) if response.status() == 200 => {
            match response.json::<GeneratedPayload>().await {
                Ok(payload) => match request {
                    WidgetRequest::GenerateImage { uploader_id, .. } => {
                        WidgetResponse::ImageGenerated {
                            uploader_id,
                            data: payload.data,
                        }
                    }
                    WidgetRequest::GenerateDetailedPrompt { uploader_id, .. } => {
                        WidgetResponse::PromptGenerated {
                            uploader_id,
                            data: payload.data,
                        }
                    }
                },
                Err(err) => WidgetResponse::error_for(&request, err.to_string()),
            }
        }
        Ok(response) => {
            let detail = response.text().await.unwrap_or_default();
            WidgetResponse::error_for(&request, detail)
        }
        Err(err) => WidgetResponse::error_for(&request, err.to_string()),
    }
}

/// Reads plain text from the clipboard. Denial by the runtime surfaces as an
/// error string for a toast, never as a change to document state.
pub async fn read_clipboard_text() -> Result<String, String> {
    let window = web_sys::window().ok_or_else(|| "tidak ada window".to_string())?;
    let promise = window.navigator().clipboard().read_text();
    let value = JsFuture::from(promise)
        .await
        .map_err(|err| format!("{:?}", err))?;
    value
        .as_string()
        .ok_or_else(|| "papan klip tidak berisi teks".to_string())
}

/// Writes plain text to the clipboard.
pub async fn write_clipboard_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "tidak ada window".to_string())?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| format!("{:?}", err))
}

/// Opens a new window with `html` and triggers the print dialog. A blocked
/// popup is reported to the caller; the embedded document is untouched.
pub fn open_print_window(html: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "tidak ada window".to_string())?;
    let popup = window
        .open_with_url_and_target("", "_blank")
        .map_err(|err| format!("{:?}", err))?
        .ok_or_else(|| "Jendela cetak diblokir oleh peramban.".to_string())?;
    let document: HtmlDocument = popup
        .document()
        .ok_or_else(|| "jendela cetak tanpa dokumen".to_string())?
        .unchecked_into();
    document
        .write(&js_sys::Array::of1(&JsValue::from_str(html)))
        .map_err(|err| format!("{:?}", err))?;
    document.close().map_err(|err| format!("{:?}", err))?;
    popup.print().map_err(|err| format!("{:?}", err))
}

/// Triggers a browser download of `html` under `filename` via a temporary
/// object URL and a synthesized anchor click.
pub fn download_html(filename: &str, html: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "tidak ada window".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "tidak ada dokumen".to_string())?;

    let parts = js_sys::Array::of1(&JsValue::from_str(html));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/html;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|err| format!("{:?}", err))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|err| format!("{:?}", err))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|err| format!("{:?}", err))?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Creates the empty document the editor starts with when nothing is loaded.
pub fn create_empty_document() -> Document {
    Document {
        id: uuid::Uuid::new_v4().to_string(),
        title: "Dokumen Baru".to_string(),
        html: String::new(),
    }
}

/// Computes the MD5 hex digest used for the unsaved-changes indicator.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Shows a temporary notification at the bottom of the screen. Used for
/// clipboard and popup failures and for save feedback; never tied to a
/// widget.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    let toast: HtmlElement = toast.unchecked_into();
    let style = toast.style();
    for (prop, value) in [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", "translateX(-50%)"),
        ("background", "rgba(33, 33, 33, 0.9)"),
        ("color", "#fff"),
        ("padding", "10px 20px"),
        ("border-radius", "4px"),
        ("z-index", "10000"),
        ("font-family", "sans-serif"),
    ] {
        style.set_property(prop, value).ok();
    }

    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = toast.parent_node() {
                parent.remove_child(&toast).ok();
            }
        });
    }
}
