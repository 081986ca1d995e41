//! Centralized slug and display-text helpers.
//!
//! Every output path on the site is derived from a human-readable name
//! (state, city, provider, procedure) through [`slugify`]. Keeping a single
//! implementation here guarantees that a city card on a state page links to
//! exactly the directory the city page was written to.
//!
//! ## Slug Rules
//!
//! - `"New York"` → `"new-york"`
//! - `"St. Louis"` → `"st-louis"`
//! - `"Ear, Nose & Throat Associates"` → `"ear-nose-and-throat-associates"`
//! - `"Children's Hospital (Main)"` → `"childrens-hospital-main"`
//!
//! Slugs only ever contain `a-z`, `0-9` and single interior hyphens, so
//! slugifying a slug returns it unchanged.
//!
//! [`slugify`] returns `""` for names without ASCII letters or digits
//! (`"東京"`, `"..."`). Output paths go through [`path_slug`], which spells
//! such names out by code point instead.

/// Convert a display name into a URL-safe slug.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase().replace('&', " and ");
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
        // everything else is punctuation and dropped without a separator
    }
    slug
}

/// [`slugify`], falling back to code points when that comes out empty.
///
/// `"東京"` → `"u6771-u4eac"`. Only a blank name yields `""`, and the
/// result is always a valid slug.
pub fn path_slug(name: &str) -> String {
    let slug = slugify(name);
    if !slug.is_empty() {
        return slug;
    }
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| format!("u{:x}", u32::from(c)))
        .collect::<Vec<_>>()
        .join("-")
}

/// Truncate `text` to at most `max` characters, appending `...` when cut.
///
/// Counts characters, not bytes, so multi-byte text never splits mid-char.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Collapse every run of line breaks into a single space.
pub fn collapse_newlines(text: &str) -> String {
    text.split(['\n', '\r'])
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a comma-separated field into trimmed, non-empty items.
pub fn split_list(field: &str) -> Vec<&str> {
    field
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Format a whole-dollar amount with thousands separators: `65000` → `$65,000`.
pub fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `"1 Provider"`, `"3 Providers"`.
pub fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
