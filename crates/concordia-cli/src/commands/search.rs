use anyhow::Result;
use concordia_search::{Config, SearchEngine};

use super::{preview, RESULT_PREVIEW_LEN};

pub async fn run_search(config: &Config, query: &str) -> Result<()> {
    let engine = SearchEngine::new(config)?;

    let outcome = match engine.search(query).await {
        Ok(outcome) => outcome,
        Err(err) => return super::report(err),
    };

    if let Some(citation) = &outcome.citation {
        println!("📖 {}: \"{}\"", citation.reference, citation.text);
        println!();
    }

    if outcome.results.is_empty() {
        println!("No results. The corpus may be empty; add documents with `concordia add`.");
        return Ok(());
    }

    println!("🔍 {} result(s) for \"{}\":\n", outcome.results.len(), outcome.query);
    for (rank, result) in outcome.results.iter().enumerate() {
        println!(
            "  {}. {} ({:.3})",
            rank + 1,
            result.document.title,
            result.score
        );
        println!("     {}", preview(&result.document.body, RESULT_PREVIEW_LEN));
        println!("     id: {}", result.id);
    }

    Ok(())
}
