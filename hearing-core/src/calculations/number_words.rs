//! Amounts in words, Indian numbering system.
//!
//! Numbers are grouped as crore (10,000,000), lakh (100,000), thousand and
//! the final hundreds, so `1234567` reads
//! "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven only".
//!
//! A crore count above 99 is itself grouped the same way ("One Thousand
//! Crore"), which keeps every output well formed for any `u64`.

use rust_decimal::Decimal;

use crate::calculations::common::{parse_decimal, whole_units};

const UNITS: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

const SUFFIX: &str = " only";

/// Converts form text to words.
///
/// The fraction is truncated toward zero. Blank, non-numeric and negative
/// input yields an empty string.
///
/// # Examples
///
/// ```
/// use hearing_core::calculations::number_to_words;
///
/// assert_eq!(number_to_words("100000"), "One Lakh only");
/// assert_eq!(number_to_words("19.9"), "Nineteen only");
/// assert_eq!(number_to_words(""), "");
/// ```
pub fn number_to_words(input: &str) -> String {
    amount_to_words(parse_decimal(input))
}

/// Converts an optional amount to words; `None` yields an empty string.
pub fn amount_to_words(value: Option<Decimal>) -> String {
    value
        .and_then(whole_units)
        .map(integer_to_words)
        .unwrap_or_default()
}

/// Converts a whole number to words, always ending in `" only"`.
pub fn integer_to_words(value: u64) -> String {
    if value == 0 {
        return format!("Zero{SUFFIX}");
    }
    format!("{}{SUFFIX}", scale_groups(value).join(" "))
}

/// Strips the trailing `" only"` that [`integer_to_words`] appends.
pub fn without_suffix(words: &str) -> &str {
    words.strip_suffix(SUFFIX).unwrap_or(words)
}

fn scale_groups(value: u64) -> Vec<&'static str> {
    let crore = value / CRORE;
    let mut rest = value % CRORE;
    let lakh = rest / LAKH;
    rest %= LAKH;
    let thousand = rest / THOUSAND;
    rest %= THOUSAND;

    let mut words = Vec::new();
    if crore > 0 {
        words.extend(scale_groups(crore));
        words.push("Crore");
    }
    for (count, scale) in [(lakh, "Lakh"), (thousand, "Thousand")] {
        if count > 0 {
            words.extend(chunk_words(count));
            words.push(scale);
        }
    }
    if rest > 0 {
        words.extend(chunk_words(rest));
    }
    words
}

/// Words for `1..=999`.
fn chunk_words(n: u64) -> Vec<&'static str> {
    debug_assert!(n < 1000);
    let mut words = Vec::with_capacity(4);

    let hundreds = (n / 100) as usize;
    if hundreds > 0 {
        words.push(UNITS[hundreds]);
        words.push("Hundred");
    }

    let rest = (n % 100) as usize;
    match rest {
        10..=19 => words.push(TEENS[rest - 10]),
        20.. => {
            words.push(TENS[rest / 10]);
            if rest % 10 > 0 {
                words.push(UNITS[rest % 10]);
            }
        }
        1..=9 => words.push(UNITS[rest]),
        _ => {}
    }
    words
}
