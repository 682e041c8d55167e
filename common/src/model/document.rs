use serde::{Deserialize, Serialize};

/// One named content section of the assistant output, e.g. a lesson plan or
/// a report card draft. `html` is the canonical raw content the preview host
/// reprocesses on every load; the interactive widget markup is derived from
/// it, never stored back into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub html: String,
}
