//! Properties of the preview/editor component.

use yew::prelude::*;

/// Configuration passed by the parent view.
#[derive(Properties, PartialEq, Clone)]
pub struct PreviewProps {
    /// Id of a stored document to load on first render. Without it the
    /// component starts with a single empty section and waits for pasted
    /// content.
    #[prop_or_default]
    pub document_id: Option<String>,
}
