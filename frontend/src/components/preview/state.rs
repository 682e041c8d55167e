//! Runtime state of the preview/editor component.
//!
//! The component owns a list of named content sections (tabs) whose raw HTML
//! is the canonical content, plus the handle of the iframe hosting the
//! transformed document. The iframe document itself is never authoritative:
//! it is rewritten from canonical content on every load and read back only
//! at explicit points (edit-mode exit, export actions).

use wasm_bindgen::prelude::Closure;
use web_sys::MessageEvent;
use yew::prelude::*;

use common::model::document::Document;

/// State container for the `PreviewComponent`.
///
/// Fields are `pub` because they are accessed by the `view` and `update`
/// modules.
pub struct PreviewComponent {
    /// Named content sections. `html` holds each section's canonical raw
    /// content (placeholders, not widgets).
    pub sections: Vec<Document>,

    /// Index of the section currently shown in the iframe.
    pub active_section: usize,

    /// Whether the embedded document is directly editable (`designMode`).
    pub edit_mode: bool,

    /// Reference to the preview `<iframe>` DOM node.
    pub iframe_ref: NodeRef,

    /// The window-level `message` listener. Held here so the closure stays
    /// alive for the component's lifetime; stale events are filtered by
    /// source, not by re-registering.
    pub message_listener: Option<Closure<dyn FnMut(MessageEvent)>>,

    /// MD5 of each section's canonical content at last load or save, used
    /// for the unsaved-changes indicator.
    pub saved_md5: Vec<Option<String>>,

    /// Guard so first-render initialization runs once.
    pub loaded: bool,
}

impl PreviewComponent {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            active_section: 0,
            edit_mode: false,
            iframe_ref: Default::default(),
            message_listener: None,
            saved_md5: Vec::new(),
            loaded: false,
        }
    }

    /// The section currently backing the iframe, if any.
    pub fn active(&self) -> Option<&Document> {
        self.sections.get(self.active_section)
    }

    /// Replaces the canonical content of the active section.
    pub fn set_active_html(&mut self, html: String) {
        if let Some(section) = self.sections.get_mut(self.active_section) {
            section.html = html;
        }
    }
}
