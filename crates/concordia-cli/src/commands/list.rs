use anyhow::Result;
use concordia_core::schema::Database;
use concordia_search::Config;

use super::{preview, LIST_PREVIEW_LEN};

pub fn run_list(config: &Config) -> Result<()> {
    let db = Database::open(&config.database_path)?;
    let documents = db.get_all()?;

    if documents.is_empty() {
        println!("The corpus is empty. Add documents with `concordia add`.");
        return Ok(());
    }

    println!("📚 {} document(s), newest first:\n", documents.len());
    for document in &documents {
        println!("  [{}] {}", document.created_at.format("%Y-%m-%d"), document.title);
        println!("     {}", preview(&document.body, LIST_PREVIEW_LEN));
        println!("     id: {}", document.id);
    }

    Ok(())
}
