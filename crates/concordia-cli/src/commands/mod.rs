pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod search;
pub mod show;
pub mod status;

pub use add::run_add;
pub use config::run_config;
pub use delete::run_delete;
pub use edit::run_edit;
pub use list::run_list;
pub use search::run_search;
pub use show::run_show;
pub use status::run_status;

use anyhow::Result;
use concordia_core::model::DocumentId;
use concordia_search::SearchError;

/// Characters of body text shown per search result.
pub const RESULT_PREVIEW_LEN: usize = 150;
/// Characters of body text shown in list output.
pub const LIST_PREVIEW_LEN: usize = 100;

/// Parse a document id argument.
pub fn parse_id(raw: &str) -> Result<DocumentId> {
    raw.parse()
        .map_err(|_| anyhow::anyhow!("'{raw}' is not a valid document id"))
}

/// Truncate body text for display, on a character boundary.
pub fn preview(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let cut: String = body.chars().take(max_chars).collect();
    format!("{cut}...")
}

/// Print user-facing errors as plain messages; bubble up the rest.
pub fn report(err: SearchError) -> Result<()> {
    if err.is_user_error() {
        eprintln!("✗ {err}");
        Ok(())
    } else {
        Err(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("curto", 150), "curto");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        // Multi-byte characters must not be split.
        let text = "é".repeat(200);
        let cut = preview(&text, 150);
        assert_eq!(cut.chars().count(), 153);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_search_results_show_longer_previews_than_list() {
        let body = "a".repeat(300);
        let for_search = preview(&body, RESULT_PREVIEW_LEN);
        let for_list = preview(&body, LIST_PREVIEW_LEN);
        assert_eq!(for_search.chars().count(), 150 + 3);
        assert_eq!(for_list.chars().count(), 100 + 3);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
    }
}
