use anyhow::Result;
use concordia_core::schema::Database;
use concordia_search::Config;

use super::parse_id;

pub fn run_show(config: &Config, id: &str) -> Result<()> {
    let id = parse_id(id)?;

    let db = Database::open(&config.database_path)?;
    let Some(document) = db.get_by_id(&id)? else {
        eprintln!("✗ No document with id {id}");
        return Ok(());
    };

    println!("📄 {}\n", document.title);
    println!("{}\n", document.body);
    println!("  id: {}", document.id);
    println!(
        "  {} words, {} characters",
        document.word_count, document.character_count
    );
    println!("  created: {}", document.created_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(updated_at) = document.updated_at {
        println!("  updated: {}", updated_at.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(image) = &document.source_image_ref {
        println!("  source image: {image}");
    }
    match &document.embedding {
        Some(vector) => println!("  embedding: {} dimensions", vector.len()),
        None => println!("  embedding: missing (edit the document to regenerate)"),
    }

    Ok(())
}
