/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Corpus documents with their embedding vectors
CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    title_normalized TEXT NOT NULL,
    body TEXT NOT NULL,
    embedding TEXT,
    source_image_ref TEXT,
    word_count INTEGER NOT NULL,
    character_count INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT
);

-- Case-insensitive title uniqueness, enforced atomically at write time
CREATE UNIQUE INDEX IF NOT EXISTS idx_documents_title_normalized
    ON documents(title_normalized);

CREATE INDEX IF NOT EXISTS idx_documents_created_at
    ON documents(created_at);
";

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: MIGRATION_001,
}];
