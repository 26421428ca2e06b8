use anyhow::Result;
use concordia_core::schema::Database;
use concordia_search::{Config, SearchEngine};

pub async fn run_status(config: &Config) -> Result<()> {
    let count = {
        let db = Database::open(&config.database_path)?;
        db.count()?
    };

    println!("\n📊 Concordia Status\n");
    println!("  Database: {}", config.database_path.display());
    println!("  Documents: {count}");
    println!("  Ollama: {}", config.ollama_url);
    println!("  Embedding model: {}", config.embedding_model);
    println!("  Bible API: {} ({})", config.bible_api_url, config.translation);

    let engine = SearchEngine::new(config)?;
    if engine.check_provider().await {
        println!("  Model available: yes");
        engine.warm_up().await;
    } else {
        println!("  Model available: NO");
        println!("\n  Run `ollama pull {}` and make sure Ollama is running", config.embedding_model);
    }

    Ok(())
}
