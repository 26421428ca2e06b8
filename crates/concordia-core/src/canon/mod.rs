//! Citation parsing against the canonical book table.
//!
//! A citation is a structured verse reference such as "Lucas 2,15" or
//! "João 3:16". Parsing is pure string work over a static alias table;
//! it performs no I/O and never fails, so callers can use it to branch
//! between citation lookup and free-text search.

pub mod books;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub use books::{lookup_book, BookId};

/// A parsed verse reference. Ephemeral: produced from raw text and
/// consumed immediately, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub book: BookId,
    pub chapter: u32,
    pub verse: u32,
}

impl Citation {
    /// Canonical display form, e.g. "Lucas 2:15".
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book.name(), self.chapter, self.verse)
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference())
    }
}

// Grammar 1: "<book> <chapter>[,:.]<verse>", e.g. "Lucas 2,15".
static PUNCTUATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+)[,:.](\d+)$").expect("valid citation regex")
});

// Grammar 2: "<book> <chapter> <verse>", space-separated.
static SPACED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d+)\s+(\d+)$").expect("valid citation regex"));

/// Parse a raw string into a [`Citation`].
///
/// The input is trimmed and lowercased, then matched against the two
/// accepted grammars in order. The book portion must appear verbatim in
/// the alias table; a string that fits the grammar but names an unknown
/// book is not a citation.
#[must_use]
pub fn parse(raw: &str) -> Option<Citation> {
    let cleaned = raw.trim().to_lowercase();

    for pattern in [&*PUNCTUATED, &*SPACED] {
        if let Some(captures) = pattern.captures(&cleaned) {
            let book_part = captures[1].trim();
            let chapter: u32 = captures[2].parse().ok()?;
            let verse: u32 = captures[3].parse().ok()?;

            if let Some(book) = lookup_book(book_part) {
                return Some(Citation {
                    book,
                    chapter,
                    verse,
                });
            }
        }
    }

    None
}

/// Whether the raw string reads as a citation. Total and pure: never
/// fails, touches no I/O.
#[must_use]
pub fn is_citation(raw: &str) -> bool {
    parse(raw).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separator() {
        let citation = parse("Lucas 2,15").unwrap();
        assert_eq!(citation.book.number(), 42);
        assert_eq!(citation.chapter, 2);
        assert_eq!(citation.verse, 15);
    }

    #[test]
    fn test_parse_colon_and_period_separators() {
        assert_eq!(parse("João 3:16"), parse("João 3.16"));
        assert_eq!(parse("João 3:16").unwrap().book.number(), 43);
    }

    #[test]
    fn test_parse_space_separated_grammar() {
        let citation = parse("Mateus 5 3").unwrap();
        assert_eq!(citation.book.number(), 40);
        assert_eq!(citation.chapter, 5);
        assert_eq!(citation.verse, 3);
    }

    #[test]
    fn test_parse_is_case_and_whitespace_insensitive() {
        assert_eq!(parse("  LUCAS 2,15  "), parse("lucas 2,15"));
    }

    #[test]
    fn test_alias_spellings_resolve_to_same_book() {
        let by_abbrev = parse("Jo 3:16").unwrap();
        let by_diacritic = parse("João 3:16").unwrap();
        let by_plain = parse("joao 3,16").unwrap();
        assert_eq!(by_abbrev.book, by_diacritic.book);
        assert_eq!(by_plain.book, by_diacritic.book);
    }

    #[test]
    fn test_ordinal_book_with_spaces() {
        let citation = parse("1 Coríntios 13,4").unwrap();
        assert_eq!(citation.book.number(), 46);
        assert_eq!(citation.chapter, 13);
        assert_eq!(citation.verse, 4);
    }

    #[test]
    fn test_ordinal_book_space_grammar() {
        let citation = parse("2 Pedro 1 5").unwrap();
        assert_eq!(citation.book.number(), 61);
    }

    #[test]
    fn test_unknown_book_is_not_a_citation() {
        // Well-formed grammar, unknown book: negative case, no fuzzing.
        assert!(parse("Lucass 2,15").is_none());
        assert!(!is_citation("Narnia 1:1"));
    }

    #[test]
    fn test_free_text_is_not_a_citation() {
        assert!(!is_citation("alegria no sofrimento"));
        assert!(!is_citation("Lucas"));
        assert!(!is_citation("Lucas 2"));
    }

    #[test]
    fn test_is_citation_is_total() {
        assert!(!is_citation(""));
        assert!(!is_citation("   "));
        assert!(!is_citation("1234567890123456789012 1,1"));
        assert!(!is_citation("\u{0}\u{fffd}"));
    }

    #[test]
    fn test_oversized_numbers_are_rejected() {
        assert!(!is_citation("lucas 99999999999999999999,1"));
    }

    #[test]
    fn test_reference_uses_canonical_name() {
        assert_eq!(parse("lc 2,15").unwrap().reference(), "Lucas 2:15");
        assert_eq!(parse("jo 3 16").unwrap().to_string(), "João 3:16");
    }
}
