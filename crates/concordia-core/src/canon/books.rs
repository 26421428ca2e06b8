//! Canonical book table.
//!
//! 66 fixed book identifiers covering both testaments, plus a static
//! alias table mapping Portuguese spellings and abbreviations (with and
//! without diacritics, with and without a leading ordinal) to one
//! canonical id. The table is data, not a chain of conditionals.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// One of the 66 canonical book identifiers, independent of the spelling
/// or language variant used to reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(u8);

impl BookId {
    /// Build a book id, accepting only the canonical range 1..=66.
    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (1..=66).contains(&number).then_some(Self(number))
    }

    /// The canonical book number (1 = Gênesis, 66 = Apocalipse).
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Canonical display name of the book.
    #[must_use]
    pub fn name(self) -> &'static str {
        CANONICAL_BOOKS[usize::from(self.0) - 1]
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical display names, indexed by book number minus one.
const CANONICAL_BOOKS: [&str; 66] = [
    "Gênesis",
    "Êxodo",
    "Levítico",
    "Números",
    "Deuteronômio",
    "Josué",
    "Juízes",
    "Rute",
    "1 Samuel",
    "2 Samuel",
    "1 Reis",
    "2 Reis",
    "1 Crônicas",
    "2 Crônicas",
    "Esdras",
    "Neemias",
    "Ester",
    "Jó",
    "Salmos",
    "Provérbios",
    "Eclesiastes",
    "Cantares",
    "Isaías",
    "Jeremias",
    "Lamentações",
    "Ezequiel",
    "Daniel",
    "Oséias",
    "Joel",
    "Amós",
    "Obadias",
    "Jonas",
    "Miquéias",
    "Naum",
    "Habacuque",
    "Sofonias",
    "Ageu",
    "Zacarias",
    "Malaquias",
    "Mateus",
    "Marcos",
    "Lucas",
    "João",
    "Atos",
    "Romanos",
    "1 Coríntios",
    "2 Coríntios",
    "Gálatas",
    "Efésios",
    "Filipenses",
    "Colossenses",
    "1 Tessalonicenses",
    "2 Tessalonicenses",
    "1 Timóteo",
    "2 Timóteo",
    "Tito",
    "Filemom",
    "Hebreus",
    "Tiago",
    "1 Pedro",
    "2 Pedro",
    "1 João",
    "2 João",
    "3 João",
    "Judas",
    "Apocalipse",
];

/// Alias spellings, already case-folded. Lookup is verbatim: no fuzzy
/// matching, no partial matches.
///
/// The bare abbreviation "jo" is deliberately assigned to João (43), not
/// Jó (18); Jó stays reachable through its diacritic form and full name.
const ALIASES: &[(&str, u8)] = &[
    // Old Testament
    ("genesis", 1),
    ("gênesis", 1),
    ("gn", 1),
    ("exodo", 2),
    ("êxodo", 2),
    ("ex", 2),
    ("levitico", 3),
    ("levítico", 3),
    ("lv", 3),
    ("numeros", 4),
    ("números", 4),
    ("nm", 4),
    ("deuteronomio", 5),
    ("deuteronômio", 5),
    ("dt", 5),
    ("josue", 6),
    ("josué", 6),
    ("js", 6),
    ("juizes", 7),
    ("juízes", 7),
    ("jz", 7),
    ("rute", 8),
    ("rt", 8),
    ("1 samuel", 9),
    ("1samuel", 9),
    ("1sm", 9),
    ("1 sm", 9),
    ("2 samuel", 10),
    ("2samuel", 10),
    ("2sm", 10),
    ("2 sm", 10),
    ("1 reis", 11),
    ("1reis", 11),
    ("1rs", 11),
    ("1 rs", 11),
    ("2 reis", 12),
    ("2reis", 12),
    ("2rs", 12),
    ("2 rs", 12),
    ("1 cronicas", 13),
    ("1crônicas", 13),
    ("1 crônicas", 13),
    ("1cr", 13),
    ("1 cr", 13),
    ("2 cronicas", 14),
    ("2crônicas", 14),
    ("2 crônicas", 14),
    ("2cr", 14),
    ("2 cr", 14),
    ("esdras", 15),
    ("ed", 15),
    ("neemias", 16),
    ("ne", 16),
    ("ester", 17),
    ("et", 17),
    ("jó", 18),
    ("salmos", 19),
    ("sl", 19),
    ("proverbios", 20),
    ("provérbios", 20),
    ("pv", 20),
    ("eclesiastes", 21),
    ("ec", 21),
    ("cantares", 22),
    ("canticos", 22),
    ("cânticos", 22),
    ("isaias", 23),
    ("isaías", 23),
    ("is", 23),
    ("jeremias", 24),
    ("jr", 24),
    ("lamentacoes", 25),
    ("lamentações", 25),
    ("lm", 25),
    ("ezequiel", 26),
    ("ez", 26),
    ("daniel", 27),
    ("dn", 27),
    ("oseias", 28),
    ("oséias", 28),
    ("joel", 29),
    ("amos", 30),
    ("amós", 30),
    ("obadias", 31),
    ("jonas", 32),
    ("miqueias", 33),
    ("miquéias", 33),
    ("naum", 34),
    ("habacuque", 35),
    ("sofonias", 36),
    ("ageu", 37),
    ("zacarias", 38),
    ("malaquias", 39),
    // New Testament
    ("mateus", 40),
    ("mt", 40),
    ("marcos", 41),
    ("mc", 41),
    ("lucas", 42),
    ("lc", 42),
    ("joao", 43),
    ("joão", 43),
    ("jo", 43),
    ("atos", 44),
    ("at", 44),
    ("romanos", 45),
    ("rm", 45),
    ("1 corintios", 46),
    ("1corintios", 46),
    ("1 coríntios", 46),
    ("1coríntios", 46),
    ("1co", 46),
    ("1 co", 46),
    ("2 corintios", 47),
    ("2corintios", 47),
    ("2 coríntios", 47),
    ("2coríntios", 47),
    ("2co", 47),
    ("2 co", 47),
    ("galatas", 48),
    ("gálatas", 48),
    ("gl", 48),
    ("efesios", 49),
    ("efésios", 49),
    ("ef", 49),
    ("filipenses", 50),
    ("colossenses", 51),
    ("1 tessalonicenses", 52),
    ("1tessalonicenses", 52),
    ("2 tessalonicenses", 53),
    ("2tessalonicenses", 53),
    ("1 timoteo", 54),
    ("1timóteo", 54),
    ("1 timóteo", 54),
    ("2 timoteo", 55),
    ("2timóteo", 55),
    ("2 timóteo", 55),
    ("tito", 56),
    ("filemom", 57),
    ("filêmon", 57),
    ("hebreus", 58),
    ("tiago", 59),
    ("1 pedro", 60),
    ("1pedro", 60),
    ("2 pedro", 61),
    ("2pedro", 61),
    ("1 joao", 62),
    ("1joão", 62),
    ("1 joão", 62),
    ("2 joao", 63),
    ("2joão", 63),
    ("2 joão", 63),
    ("3 joao", 64),
    ("3joão", 64),
    ("3 joão", 64),
    ("judas", 65),
    ("apocalipse", 66),
];

static ALIAS_MAP: LazyLock<HashMap<&'static str, BookId>> = LazyLock::new(|| {
    ALIASES
        .iter()
        .map(|&(alias, number)| (alias, BookId(number)))
        .collect()
});

/// Look up an already case-folded book spelling in the alias table.
#[must_use]
pub fn lookup_book(alias: &str) -> Option<BookId> {
    ALIAS_MAP.get(alias).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table_covers_both_testaments() {
        assert_eq!(CANONICAL_BOOKS.len(), 66);
        assert_eq!(BookId::new(1).unwrap().name(), "Gênesis");
        assert_eq!(BookId::new(66).unwrap().name(), "Apocalipse");
    }

    #[test]
    fn test_book_id_range() {
        assert!(BookId::new(0).is_none());
        assert!(BookId::new(67).is_none());
        assert_eq!(BookId::new(42).unwrap().number(), 42);
    }

    #[test]
    fn test_alias_spellings_converge() {
        let joao = lookup_book("joão").unwrap();
        assert_eq!(lookup_book("joao"), Some(joao));
        assert_eq!(lookup_book("jo"), Some(joao));
        assert_eq!(joao.number(), 43);
    }

    #[test]
    fn test_job_reachable_with_diacritic() {
        assert_eq!(lookup_book("jó").unwrap().number(), 18);
    }

    #[test]
    fn test_ordinal_aliases() {
        assert_eq!(lookup_book("1 co").unwrap().number(), 46);
        assert_eq!(lookup_book("1corintios").unwrap().number(), 46);
        assert_eq!(lookup_book("2 sm").unwrap().number(), 10);
    }

    #[test]
    fn test_no_fuzzy_matching() {
        assert!(lookup_book("luc").is_none());
        assert!(lookup_book("lucass").is_none());
        assert!(lookup_book("").is_none());
    }

    #[test]
    fn test_every_alias_points_at_a_valid_book() {
        for &(alias, number) in ALIASES {
            assert!(
                BookId::new(number).is_some(),
                "alias {alias:?} points at invalid book {number}"
            );
        }
    }
}
