//! String and ISBN normalization used for comparison
//!
//! Nothing here touches the stored records; the loader keeps titles and
//! authors as exported and the matcher normalizes on the fly.

/// Leading articles dropped from titles
const ARTICLES: [&str; 3] = ["the", "a", "an"];

/// Collapse runs of whitespace into single spaces and trim, preserving case
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase, drop apostrophes, turn other punctuation into spaces, collapse whitespace
pub fn normalize_name(s: &str) -> String {
    let mut cleaned = String::with_capacity(s.len());

    for c in s.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            cleaned.push(c);
        } else if !matches!(c, '\'' | '\u{2018}' | '\u{2019}') {
            // Apostrophes vanish so "Ender's" and "Enders" compare equal
            cleaned.push(' ');
        }
    }

    collapse_whitespace(&cleaned)
}

/// Normalize a title: series suffix removed, [`normalize_name`], then one
/// leading article stripped
///
/// A title consisting only of an article keeps it.
pub fn normalize_title(s: &str) -> String {
    let normalized = normalize_name(strip_series_suffix(s));

    if let Some((first, rest)) = normalized.split_once(' ') {
        if ARTICLES.contains(&first) {
            return rest.to_string();
        }
    }

    normalized
}

/// Remove a trailing Goodreads series marker such as `"(The Expanse, #1)"`
pub fn strip_series_suffix(title: &str) -> &str {
    let trimmed = title.trim_end();

    if let Some(body) = trimmed.strip_suffix(')') {
        if let Some(open) = body.rfind('(') {
            if body[open..].contains('#') {
                return trimmed[..open].trim_end();
            }
        }
    }

    trimmed
}

/// The part of a title before a `:` subtitle separator, if there is one
pub fn main_title(title: &str) -> Option<&str> {
    let (main, _subtitle) = title.split_once(':')?;
    let main = main.trim();
    (!main.is_empty()).then_some(main)
}

/// Split a multi-author display string ("A, B & C and D") into individual names
pub fn split_authors(authors: &str) -> Vec<&str> {
    authors
        .split([',', '&', ';'])
        .flat_map(|part| part.split(" and "))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Strip spreadsheet quoting and separators from an exported ISBN
///
/// Goodreads writes ISBNs as `="0441013597"`; an empty value (`=""`) yields `None`.
/// Letters are kept (uppercased) so identifiers such as ASINs stay distinct.
pub fn clean_isbn(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    (!cleaned.is_empty()).then_some(cleaned)
}

/// Canonical ISBN-13 form used for equality checks
///
/// ISBN-10 values are converted to their 978-prefixed ISBN-13 equivalent.
/// Anything that is not a plausible ISBN returns `None`.
pub fn canonical_isbn(raw: &str) -> Option<String> {
    let cleaned = clean_isbn(raw)?;

    match cleaned.len() {
        13 if cleaned.bytes().all(|b| b.is_ascii_digit()) => Some(cleaned),
        10 => isbn10_to_isbn13(&cleaned),
        _ => None,
    }
}

/// Key two ISBN fields are compared by
///
/// Values that are valid ISBN-10/13 compare by their ISBN-13 form; anything
/// else compares by its cleaned text, so equal identifiers always match.
pub fn isbn_key(raw: &str) -> Option<String> {
    canonical_isbn(raw).or_else(|| clean_isbn(raw))
}

fn isbn10_to_isbn13(isbn10: &str) -> Option<String> {
    let (body, check) = isbn10.split_at(9);
    let valid_check = matches!(check.as_bytes(), [b'0'..=b'9' | b'X']);
    if !valid_check || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let base = format!("978{}", body);
    let sum: u32 = base
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 {
                digit
            } else {
                digit * 3
            }
        })
        .sum();
    let check = (10 - sum % 10) % 10;

    Some(format!("{}{}", base, check))
}
