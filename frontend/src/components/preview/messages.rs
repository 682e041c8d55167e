use common::messages::WidgetRequest;
use common::model::document::Document;

pub enum Msg {
    SetDocuments(Vec<Document>),
    SetSection(usize),
    EmbeddedLoaded,
    ToggleEditMode,
    PasteFromClipboard,
    PastedContent(String),
    WidgetRequested(WidgetRequest),
    CopyHtml,
    PrintDocument,
    DownloadHtml,
    Save,
    SaveSucceeded,
    Notify(String),
}
