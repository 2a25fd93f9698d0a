// src/collate.rs
//
// Locale-aware, numeric-aware string collation for table sorting.
//
// Levels:
// - primary: digit runs by numeric value, text runs with accents and case folded away
// - secondary: text runs with accents kept (case still folded), so "e" < "é"
// Digit runs sort before text runs at the same position. Case alone never orders.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Debug, PartialEq, Eq)]
enum Chunk {
    /// Digits with leading zeros stripped ("007" → "7", "000" → "0")
    Num(String),
    Text { primary: String, secondary: String },
}

impl Chunk {
    fn cmp_primary(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Num(a), Chunk::Num(b)) => cmp_digits(a, b),
            (Chunk::Num(_), Chunk::Text { .. }) => Ordering::Less,
            (Chunk::Text { .. }, Chunk::Num(_)) => Ordering::Greater,
            (Chunk::Text { primary: a, .. }, Chunk::Text { primary: b, .. }) => a.cmp(b),
        }
    }

    fn cmp_secondary(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Text { secondary: a, .. }, Chunk::Text { secondary: b, .. }) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Compare two runs of ASCII digits (no leading zeros) by value.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn push_text(out: &mut Vec<Chunk>, run: &str) {
    let secondary: String = run.nfc().flat_map(char::to_lowercase).collect();
    let primary: String = run
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    out.push(Chunk::Text { primary, secondary });
}

fn push_num(out: &mut Vec<Chunk>, run: &str) {
    let trimmed = run.trim_start_matches('0');
    out.push(Chunk::Num(if trimmed.is_empty() { s!("0") } else { s!(trimmed) }));
}

fn chunks(s: &str) -> Vec<Chunk> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (i, ch) in s.char_indices() {
        let digit = ch.is_ascii_digit();
        match in_digits {
            Some(d) if d != digit => {
                if d { push_num(&mut out, &s[start..i]) } else { push_text(&mut out, &s[start..i]) }
                start = i;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    match in_digits {
        Some(true) => push_num(&mut out, &s[start..]),
        Some(false) => push_text(&mut out, &s[start..]),
        None => {}
    }
    out
}

/// Precomputed collation key; compare many times without re-normalizing.
#[derive(Debug, PartialEq, Eq)]
pub struct SortKey(Vec<Chunk>);

impl SortKey {
    pub fn new(s: &str) -> Self {
        SortKey(chunks(s))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let primary = self.0.iter()
            .zip(&other.0)
            .map(|(a, b)| a.cmp_primary(b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| self.0.len().cmp(&other.0.len()));

        primary.then_with(|| {
            self.0.iter()
                .zip(&other.0)
                .map(|(a, b)| a.cmp_secondary(b))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One-off comparison; prefer [`SortKey`] when sorting.
pub fn compare(a: &str, b: &str) -> Ordering {
    SortKey::new(a).cmp(&SortKey::new(b))
}
