//! Search and ingest orchestration.
//!
//! One engine call handles one request end-to-end, strictly
//! sequentially: citation resolution before embedding before ranking.
//! The corpus store is opened per operation and dropped before any
//! suspension point.

use std::path::PathBuf;

use concordia_core::canon;
use concordia_core::model::{Document, DocumentDraft, DocumentId};
use concordia_core::schema::Database;
use concordia_core::Error as CoreError;

use crate::bolls::BibleClient;
use crate::config::Config;
use crate::error::{SearchError, SearchResult};
use crate::ollama::{OllamaClient, DEFAULT_MAX_RETRIES};
use crate::rank::{rank, RankedResult};

/// Fixed result limit for the query path.
pub const SEARCH_LIMIT: usize = 10;

/// A citation the query resolved to, carried along for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCitation {
    /// Canonical display form, e.g. "Lucas 2:15".
    pub reference: String,
    /// The verse text that was actually embedded.
    pub text: String,
}

/// Outcome of a successful query.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The raw query as received.
    pub query: String,
    /// The text that was embedded: verse text for citations, the query
    /// itself otherwise.
    pub search_text: String,
    /// Present when the query was recognized as a citation.
    pub citation: Option<ResolvedCitation>,
    pub results: Vec<RankedResult>,
}

/// Composes citation parsing, verse resolution, embedding, ranking and
/// the corpus store.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    embedder: OllamaClient,
    bible: BibleClient,
    db_path: PathBuf,
}

impl SearchEngine {
    /// Build an engine from configuration.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be created.
    pub fn new(config: &Config) -> SearchResult<Self> {
        let embedder = OllamaClient::new(&config.ollama_url, &config.embedding_model)?;
        let bible = BibleClient::new(&config.bible_api_url, &config.translation)?;

        Ok(Self {
            embedder,
            bible,
            db_path: config.database_path.clone(),
        })
    }

    /// Path of the underlying corpus database.
    #[must_use]
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Run one query end-to-end.
    ///
    /// A query that parses as a citation is resolved to verse text
    /// first; an unresolvable citation terminates with
    /// [`SearchError::CitationNotFound`] and deliberately does NOT fall
    /// back to free-text search.
    pub async fn search(&self, query: &str) -> SearchResult<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let citation = match canon::parse(query) {
            Some(parsed) => {
                log::info!("Detected citation: {query}");
                match self.bible.get_verse(&parsed).await {
                    Some(verse) => {
                        log::info!("Resolved {} to verse text", verse.reference);
                        Some(ResolvedCitation {
                            reference: verse.reference,
                            text: verse.text,
                        })
                    }
                    None => {
                        log::warn!("Citation not found: {query}");
                        return Err(SearchError::CitationNotFound {
                            query: query.to_string(),
                        });
                    }
                }
            }
            None => None,
        };

        let search_text = citation
            .as_ref()
            .map_or_else(|| query.to_string(), |resolved| resolved.text.clone());

        let vector = self.embedder.embed(&search_text, DEFAULT_MAX_RETRIES).await?;

        let candidates = {
            let db = Database::open(&self.db_path)?;
            db.get_all()?
        };
        let results = rank(&vector, candidates, SEARCH_LIMIT)?;

        Ok(SearchOutcome {
            query: query.to_string(),
            search_text,
            citation,
            results,
        })
    }

    /// Insert a new document: validate, refuse duplicate titles, embed
    /// the body, then write.
    pub async fn add(
        &self,
        title: &str,
        body: &str,
        source_image_ref: Option<String>,
    ) -> SearchResult<Document> {
        let mut draft = DocumentDraft::new(title, body)?;
        if let Some(reference) = source_image_ref {
            draft = draft.with_source_image(reference);
        }

        // Duplicate check first: a conflict must not cost a provider
        // round-trip. The unique index remains the atomic backstop.
        self.refuse_duplicate(&draft.title, None)?;

        let vector = self.embedder.embed(&draft.body, DEFAULT_MAX_RETRIES).await?;
        let draft = draft.with_embedding(vector);

        let db = Database::open(&self.db_path)?;
        let id = db.insert(&draft)?;
        let document = db.get_by_id(&id)?.ok_or(CoreError::NotFound {
            entity: "document",
            id: id.to_string(),
        })?;

        Ok(document)
    }

    /// Replace a document's title, body and embedding together.
    pub async fn edit(&self, id: &DocumentId, title: &str, body: &str) -> SearchResult<Document> {
        let draft = DocumentDraft::new(title, body)?;

        {
            let db = Database::open(&self.db_path)?;
            if db.get_by_id(id)?.is_none() {
                return Err(CoreError::NotFound {
                    entity: "document",
                    id: id.to_string(),
                }
                .into());
            }
        }
        // The edited record may keep its own title.
        self.refuse_duplicate(&draft.title, Some(id))?;

        let vector = self.embedder.embed(&draft.body, DEFAULT_MAX_RETRIES).await?;
        let draft = draft.with_embedding(vector);

        let db = Database::open(&self.db_path)?;
        if !db.update(id, &draft)? {
            return Err(CoreError::NotFound {
                entity: "document",
                id: id.to_string(),
            }
            .into());
        }
        let document = db.get_by_id(id)?.ok_or(CoreError::NotFound {
            entity: "document",
            id: id.to_string(),
        })?;

        Ok(document)
    }

    /// Delete a document by id.
    pub fn delete(&self, id: &DocumentId) -> SearchResult<()> {
        let db = Database::open(&self.db_path)?;
        if !db.delete(id)? {
            return Err(CoreError::NotFound {
                entity: "document",
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Whether the configured embedding model is available.
    pub async fn check_provider(&self) -> bool {
        self.embedder.check_availability().await
    }

    /// Best-effort model warm-up; never blocks startup.
    pub async fn warm_up(&self) {
        self.embedder.warm_up().await;
    }

    fn refuse_duplicate(&self, title: &str, editing: Option<&DocumentId>) -> SearchResult<()> {
        let existing = {
            let db = Database::open(&self.db_path)?;
            db.find_by_normalized_title(title)?
        };

        if let Some(existing) = existing {
            if editing != Some(&existing.id) {
                return Err(CoreError::DuplicateTitle {
                    id: existing.id.to_string(),
                    title: existing.title,
                }
                .into());
            }
        }

        Ok(())
    }
}
