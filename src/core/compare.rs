//! Numeric-aware string comparison for sorters
//!
//! Free-text fields such as names and descriptions often embed numbers
//! ("Calculus 2", "Calculus 10"). Comparing them byte-wise would place "10"
//! before "2". This comparator walks both strings together and compares
//! digit runs by numeric value, everything else case- and accent-insensitively
//! ("école" and "Ecole" compare equal).
//!
//! Character classes order as: whitespace and punctuation, then digits, then
//! letters, then anything else.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two strings with numeric-aware, case- and accent-insensitive ordering.
///
/// Returns `Ordering::Equal` for strings that differ only by letter case,
/// by accents or by leading zeros inside a number.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a, b) = (base_letters(a), base_letters(b));
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_digits = take_digits(&mut left);
                let r_digits = take_digits(&mut right);
                match compare_digit_runs(&l_digits, &r_digits) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                match char_key(l).cmp(&char_key(r)) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
        }
    }
}

// Decompose (NFD) and drop the combining marks, leaving base letters.
fn base_letters(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

// Runs are compared as arbitrarily large integers: strip leading zeros,
// then the longer run is larger, then fall back to digit-wise comparison.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn char_key(c: char) -> (u8, char) {
    let class = if c.is_whitespace() || c.is_ascii_punctuation() {
        0
    } else if c.is_ascii_digit() {
        1
    } else if c.is_alphabetic() {
        2
    } else {
        3
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}
