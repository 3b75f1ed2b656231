//! Deterministic string collation
//!
//! String comparison in formulas follows a locale-style collation rather than
//! byte order or numeric magnitude. This module pins one fixed ordering so
//! results do not depend on the host locale. Strings are first put in
//! canonical decomposed form, so an accented letter is its base letter
//! followed by combining marks. Then:
//!
//! 1. Primary level, base character by base character: whitespace, then
//!    punctuation and symbols (in [`PUNCTUATION_ORDER`], then any other symbol
//!    by code point), then digits by value, then letters ignoring case and
//!    accents.
//! 2. Secondary level: accents, compared from the first letter on. An
//!    unaccented letter sorts before the same letter with an accent.
//! 3. Tertiary level: at the first case difference, lowercase sorts first.
//! 4. Code point order as the last tie-break, so only identical strings
//!    compare equal.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Punctuation and symbols, in ascending collation order
pub const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Character classes, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
}

/// Primary collation weight of a base character
fn primary(c: char) -> (Class, u32) {
    if c.is_whitespace() || c.is_control() {
        return (Class::Whitespace, c as u32);
    }
    if let Some(index) = PUNCTUATION_ORDER.chars().position(|p| p == c) {
        return (Class::Punctuation, index as u32);
    }
    if let Some(digit) = c.to_digit(10) {
        return (Class::Digit, digit);
    }
    if c.is_numeric() {
        return (Class::Digit, 10 + c as u32);
    }
    if c.is_alphabetic() {
        let folded = c.to_lowercase().next().unwrap_or(c);
        return (Class::Letter, folded as u32);
    }
    (Class::Symbol, c as u32)
}

/// Letters without a canonical decomposition that still sort with base letters
fn fold(c: char) -> Option<(&'static str, Option<char>)> {
    const STROKE: char = '\u{335}';
    const SLASH: char = '\u{338}';

    let folded = match c {
        'ß' => ("ss", None),
        'æ' => ("ae", None),
        'Æ' => ("AE", None),
        'œ' => ("oe", None),
        'Œ' => ("OE", None),
        'ø' => ("o", Some(SLASH)),
        'Ø' => ("O", Some(SLASH)),
        'ł' => ("l", Some(STROKE)),
        'Ł' => ("L", Some(STROKE)),
        'đ' => ("d", Some(STROKE)),
        'Đ' => ("D", Some(STROKE)),
        'ħ' => ("h", Some(STROKE)),
        'Ħ' => ("H", Some(STROKE)),
        _ => return None,
    };
    Some(folded)
}

/// Sort key of a string, one sequence per collation level
#[derive(Debug, Default, PartialEq, Eq)]
struct SortKey {
    primary: Vec<(Class, u32)>,
    /// Per base character: a `0` separator, then its combining marks
    secondary: Vec<u32>,
    /// Per base character: 0 for lowercase and uncased, 1 for uppercase
    tertiary: Vec<u8>,
}

impl SortKey {
    fn new(s: &str) -> Self {
        let mut key = SortKey::default();
        for c in s.nfd() {
            if is_combining_mark(c) && !key.primary.is_empty() {
                key.secondary.push(c as u32);
                continue;
            }
            match fold(c) {
                Some((bases, mark)) => {
                    for base in bases.chars() {
                        key.push_base(base);
                    }
                    key.secondary.extend(mark.map(|m| m as u32));
                }
                None => key.push_base(c),
            }
        }
        key
    }

    fn push_base(&mut self, c: char) {
        self.primary.push(primary(c));
        self.secondary.push(0);
        self.tertiary.push(u8::from(c.is_uppercase()));
    }
}

/// Compare two strings under the pinned collation
///
/// ```rust
/// use std::cmp::Ordering;
/// use sheetcalc_formula::collation::collate;
///
/// assert_eq!(collate("0", "-1"), Ordering::Greater);
/// assert_eq!(collate("10", "9"), Ordering::Less);
/// assert_eq!(collate("apple", "Banana"), Ordering::Less);
/// assert_eq!(collate("é", "f"), Ordering::Less);
/// ```
pub fn collate(a: &str, b: &str) -> Ordering {
    let (left, right) = (SortKey::new(a), SortKey::new(b));
    left.primary
        .cmp(&right.primary)
        .then_with(|| left.secondary.cmp(&right.secondary))
        .then_with(|| left.tertiary.cmp(&right.tertiary))
        .then_with(|| a.cmp(b))
}
