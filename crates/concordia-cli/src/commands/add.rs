use anyhow::Result;
use concordia_search::{Config, SearchEngine};

pub async fn run_add(
    config: &Config,
    title: &str,
    body: &str,
    image: Option<String>,
) -> Result<()> {
    let engine = SearchEngine::new(config)?;

    println!("⏳ Embedding document body...");
    match engine.add(title, body, image).await {
        Ok(document) => {
            println!("✓ Added \"{}\"", document.title);
            println!("  id: {}", document.id);
            println!(
                "  {} words, {} characters",
                document.word_count, document.character_count
            );
            Ok(())
        }
        Err(err) => super::report(err),
    }
}
