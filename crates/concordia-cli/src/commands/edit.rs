use anyhow::Result;
use concordia_search::{Config, SearchEngine};

use super::parse_id;

pub async fn run_edit(config: &Config, id: &str, title: &str, body: &str) -> Result<()> {
    let id = parse_id(id)?;
    let engine = SearchEngine::new(config)?;

    println!("⏳ Re-embedding document body...");
    match engine.edit(&id, title, body).await {
        Ok(document) => {
            println!("✓ Updated \"{}\"", document.title);
            println!(
                "  {} words, {} characters",
                document.word_count, document.character_count
            );
            Ok(())
        }
        Err(err) => super::report(err),
    }
}
