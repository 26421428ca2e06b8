use anyhow::Result;
use concordia_search::config::{config_file_path, ensure_config_file};
use concordia_search::Config;

/// Show the current effective configuration.
pub fn run_config(config: &Config, init: bool) -> Result<()> {
    if init {
        if ensure_config_file()? {
            println!("✓ Wrote example config to {}", config_file_path().display());
        } else {
            println!("Config file already exists at {}", config_file_path().display());
        }
        return Ok(());
    }

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_file_path().display());
    let exists = config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  ollama_url: {}", config.ollama_url);
    println!("  embedding_model: {}", config.embedding_model);
    println!("  bible_api_url: {}", config.bible_api_url);
    println!("  translation: {}", config.translation);
    println!("  database_path: {}", config.database_path.display());

    println!("\nPriority: CLI args > ENV vars (CONCORDIA_*) > Config file > Defaults");

    Ok(())
}
