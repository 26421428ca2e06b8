pub mod document;
pub mod ids;

pub use document::{normalize_title, Document, DocumentDraft, MAX_TITLE_LEN};
pub use ids::DocumentId;
