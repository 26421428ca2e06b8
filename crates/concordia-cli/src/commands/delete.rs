use anyhow::Result;
use concordia_search::{Config, SearchEngine};

use super::parse_id;

pub fn run_delete(config: &Config, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    let engine = SearchEngine::new(config)?;

    match engine.delete(&id) {
        Ok(()) => {
            println!("✓ Deleted {id}");
            Ok(())
        }
        Err(err) => super::report(err),
    }
}
