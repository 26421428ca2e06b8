//! Search pipeline for concordia.
//!
//! Implements the query path (citation detection, verse resolution,
//! embedding, similarity ranking) and the ingest/edit path (duplicate
//! admission, embedding, store writes), plus the HTTP clients for the
//! embedding and scripture-lookup providers.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod bolls;
pub mod config;
pub mod engine;
pub mod error;
pub mod ollama;
pub mod rank;

pub use bolls::{BibleClient, Verse};
pub use config::Config;
pub use engine::{ResolvedCitation, SearchEngine, SearchOutcome};
pub use error::{SearchError, SearchResult};
pub use ollama::{OllamaClient, DEFAULT_MAX_RETRIES};
pub use rank::{cosine, rank, RankedResult};
