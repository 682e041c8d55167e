//! Update function for the preview/editor component, Elm style: one function
//! receives the state, the context, and a message, mutates the state, and
//! returns whether the view should re-render.
//!
//! The session state machine lives here:
//! - Viewing <-> Editing via an explicit toggle. Leaving edit mode reads the
//!   serialized embedded document back as the new canonical content and
//!   performs a fresh load.
//! - Tab changes always drop back to Viewing and fully reload the iframe
//!   from the newly selected section's raw content.
//! - Pasting replaces the canonical content and then enters Editing.
//! - Widget requests run as independent fire-and-forget tasks; each one
//!   answers the content window captured at request time, so responses that
//!   outlive a reload land in a stale window and die there.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::naming::derive_filename;
use common::transform::transform_placeholders;
use gloo_net::http::Request;

use super::helpers::{
    compute_md5, download_html, embedded_window, enable_embedded_editing, live_embedded_html,
    load_embedded, open_print_window, post_widget_response, read_clipboard_text,
    request_generation, show_toast, write_clipboard_text,
};
use super::messages::Msg;
use super::state::PreviewComponent;

pub fn update(component: &mut PreviewComponent, ctx: &Context<PreviewComponent>, msg: Msg) -> bool {
    match msg {
        Msg::SetDocuments(documents) => {
            component.saved_md5 = documents
                .iter()
                .map(|doc| Some(compute_md5(&doc.html)))
                .collect();
            component.sections = documents;
            component.active_section = 0;
            component.edit_mode = false;
            if let Some(section) = component.active() {
                load_embedded(&component.iframe_ref, &transform_placeholders(&section.html));
            }
            true
        }
        Msg::SetSection(index) => {
            if index >= component.sections.len() {
                return false;
            }
            // Leaving a tab while editing discards in-progress edits; the
            // stored content of the tab being left is not touched.
            component.edit_mode = false;
            component.active_section = index;
            if let Some(section) = component.active() {
                load_embedded(&component.iframe_ref, &transform_placeholders(&section.html));
            }
            true
        }
        Msg::EmbeddedLoaded => {
            if component.edit_mode {
                enable_embedded_editing(&component.iframe_ref);
            }
            false
        }
        Msg::ToggleEditMode => {
            if component.edit_mode {
                // Serialized iframe content becomes the canonical content;
                // reloading it clears the editable flag and any transient
                // editing artifacts.
                if let Some(html) = live_embedded_html(&component.iframe_ref) {
                    component.set_active_html(html.clone());
                    load_embedded(&component.iframe_ref, &html);
                }
                component.edit_mode = false;
            } else {
                component.edit_mode = true;
                enable_embedded_editing(&component.iframe_ref);
            }
            true
        }
        Msg::PasteFromClipboard => {
            let link = ctx.link().clone();
            spawn_local(async move {
                match read_clipboard_text().await {
                    Ok(text) => link.send_message(Msg::PastedContent(text)),
                    Err(err) => {
                        link.send_message(Msg::Notify(format!("Gagal membaca papan klip: {}", err)))
                    }
                }
            });
            false
        }
        Msg::PastedContent(text) => {
            let processed = transform_placeholders(&text);
            component.set_active_html(processed.clone());
            load_embedded(&component.iframe_ref, &processed);
            // Pasted material goes straight into edit mode for refinement;
            // designMode is applied once the fresh document has loaded.
            component.edit_mode = true;
            true
        }
        Msg::WidgetRequested(request) => {
            let target = embedded_window(&component.iframe_ref);
            spawn_local(async move {
                let response = request_generation(request).await;
                post_widget_response(target, &response);
            });
            false
        }
        Msg::CopyHtml => {
            let Some(html) = live_embedded_html(&component.iframe_ref) else {
                show_toast("Tidak ada konten untuk disalin.");
                return false;
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                let feedback = match write_clipboard_text(&html).await {
                    Ok(()) => "Konten disalin ke papan klip.".to_string(),
                    Err(err) => format!("Gagal menyalin: {}", err),
                };
                link.send_message(Msg::Notify(feedback));
            });
            false
        }
        Msg::PrintDocument => {
            let Some(html) = live_embedded_html(&component.iframe_ref) else {
                show_toast("Tidak ada konten untuk dicetak.");
                return false;
            };
            if let Err(err) = open_print_window(&html) {
                show_toast(&err);
            }
            false
        }
        Msg::DownloadHtml => {
            let Some(html) = live_embedded_html(&component.iframe_ref) else {
                show_toast("Tidak ada konten untuk diunduh.");
                return false;
            };
            let title = component
                .active()
                .map(|section| section.title.clone())
                .unwrap_or_else(|| "dokumen".to_string());
            let filename = derive_filename(&title, &html);
            if let Err(err) = download_html(&filename, &html) {
                show_toast(&format!("Gagal mengunduh: {}", err));
            }
            false
        }
        Msg::Save => {
            let Some(section) = component.active() else {
                show_toast("Tidak ada dokumen untuk disimpan.");
                return false;
            };
            let document = section.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let builder = match Request::post("/api/documents/save").json(&document) {
                    Ok(builder) => builder,
                    Err(err) => {
                        link.send_message(Msg::Notify(format!("Gagal menyimpan: {}", err)));
                        return;
                    }
                };
                match builder.send().await {
                    Ok(response) if response.status() == 200 => {
                        link.send_message(Msg::SaveSucceeded);
                        show_toast("Dokumen tersimpan.");
                    }
                    Ok(response) => {
                        let detail = response.text().await.unwrap_or_default();
                        link.send_message(Msg::Notify(format!("Gagal menyimpan: {}", detail)));
                    }
                    Err(err) => {
                        link.send_message(Msg::Notify(format!("Gagal menyimpan: {}", err)));
                    }
                }
            });
            false
        }
        Msg::SaveSucceeded => {
            let digest = component.active().map(|section| compute_md5(&section.html));
            if let Some(slot) = component.saved_md5.get_mut(component.active_section) {
                *slot = digest;
            }
            true
        }
        Msg::Notify(message) => {
            show_toast(&message);
            false
        }
    }
}
