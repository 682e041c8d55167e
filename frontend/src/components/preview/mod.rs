//! Preview/editor: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `PreviewProps`, `PreviewComponent`).
//! - Provide the `Component` implementation delegating to `update::update`
//!   and `view::view`.
//! - On first render, register the window-level `message` listener for
//!   widget requests coming out of the iframe, then load a stored document
//!   (if `document_id` is provided) or start with an empty one.

use gloo_net::http::Request;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::MessageEvent;
use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

use helpers::{create_empty_document, is_from_live_embedded, show_toast, widget_request_from_event};
pub use messages::Msg;
pub use props::PreviewProps;
pub use state::PreviewComponent;

impl Component for PreviewComponent {
    type Message = Msg;
    type Properties = PreviewProps;

    fn create(_ctx: &Context<Self>) -> Self {
        PreviewComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render || self.loaded {
            return;
        }
        self.loaded = true;

        self.attach_message_listener(ctx);

        if let Some(document_id) = &ctx.props().document_id {
            let link = ctx.link().clone();
            let document_id = document_id.clone();
            spawn_local(async move {
                let response = Request::get(&format!("/api/documents/{}", document_id))
                    .send()
                    .await;

                match response {
                    Ok(resp) if resp.status() == 200 => {
                        if let Ok(document) = resp.json::<common::model::document::Document>().await
                        {
                            link.send_message(Msg::SetDocuments(vec![document]));
                            show_toast("Dokumen dimuat.");
                        } else {
                            start_empty(link);
                        }
                    }
                    _ => start_empty(link),
                }
            });
        } else {
            ctx.link()
                .send_message(Msg::SetDocuments(vec![create_empty_document()]));
            show_toast("Tempel konten untuk memulai.");
        }
    }
}

impl PreviewComponent {
    /// Registers the single inbound `message` listener. The closure lives in
    /// component state for the whole session; events from anything but the
    /// currently live iframe window are dropped here, which also silences
    /// leftovers of replaced embedded documents.
    fn attach_message_listener(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        let iframe_ref = self.iframe_ref.clone();
        let listener = Closure::wrap(Box::new(move |event: MessageEvent| {
            if !is_from_live_embedded(&iframe_ref, &event) {
                return;
            }
            if let Some(request) = widget_request_from_event(&event) {
                link.send_message(Msg::WidgetRequested(request));
            }
        }) as Box<dyn FnMut(MessageEvent)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("message", listener.as_ref().unchecked_ref());
        }
        self.message_listener = Some(listener);
    }
}

fn start_empty(link: yew::html::Scope<PreviewComponent>) {
    link.send_message(Msg::SetDocuments(vec![create_empty_document()]));
    show_toast("Gagal memuat dokumen. Dokumen baru dibuat.");
}
