//! Filename sanitizer
//!
//! Replaces accented Latin characters with their unaccented ASCII
//! equivalents using a fixed lookup table. Every other character is kept
//! in place, so the number of characters never changes.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Accented character and its ASCII replacement.
pub const ACCENTS: &[(char, char)] = &[
    ('á', 'a'), ('à', 'a'), ('ã', 'a'), ('â', 'a'), ('ä', 'a'),
    ('é', 'e'), ('è', 'e'), ('ê', 'e'), ('ë', 'e'),
    ('í', 'i'), ('ì', 'i'), ('î', 'i'), ('ï', 'i'),
    ('ó', 'o'), ('ò', 'o'), ('õ', 'o'), ('ô', 'o'), ('ö', 'o'),
    ('ú', 'u'), ('ù', 'u'), ('û', 'u'), ('ü', 'u'),
    ('ç', 'c'), ('ñ', 'n'),
    ('Á', 'A'), ('À', 'A'), ('Ã', 'A'), ('Â', 'A'), ('Ä', 'A'),
    ('É', 'E'), ('È', 'E'), ('Ê', 'E'), ('Ë', 'E'),
    ('Í', 'I'), ('Ì', 'I'), ('Î', 'I'), ('Ï', 'I'),
    ('Ó', 'O'), ('Ò', 'O'), ('Õ', 'O'), ('Ô', 'O'), ('Ö', 'O'),
    ('Ú', 'U'), ('Ù', 'U'), ('Û', 'U'), ('Ü', 'U'),
    ('Ç', 'C'), ('Ñ', 'N'),
];

static ACCENT_MAP: LazyLock<HashMap<char, char>> =
    LazyLock::new(|| ACCENTS.iter().copied().collect());

/// ASCII replacement for `c`, if it is an accented character.
pub fn replacement(c: char) -> Option<char> {
    ACCENT_MAP.get(&c).copied()
}

pub fn is_accented(c: char) -> bool {
    ACCENT_MAP.contains_key(&c)
}

/// Returns true if `name` contains at least one accented character.
pub fn needs_sanitizing(name: &str) -> bool {
    name.chars().any(is_accented)
}

/// Replace every accented character in `name` with its ASCII equivalent.
///
/// Never fails; the empty string maps to itself.
pub fn sanitize(name: &str) -> String {
    name.chars().map(|c| replacement(c).unwrap_or(c)).collect()
}
