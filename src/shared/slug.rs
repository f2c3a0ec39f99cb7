//! Slug derivation and uniqueness resolution for category titles.
//!
//! A slug is the lowercased title with every non-alphanumeric run collapsed
//! to a single hyphen. Uniqueness is resolved against the set of existing
//! slugs sharing the same base: any prefix hit forces a numeric suffix, and
//! the chosen suffix is one past the highest suffix already taken.

/// Normalizes a title into its base slug.
///
/// Keeps ASCII alphanumerics (lowercased); every other run of characters
/// becomes a single hyphen. Leading and trailing hyphens never appear.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Picks the next free slug for `base` given every existing slug that starts
/// with `base` (the caller supplies the prefix-scan result).
///
/// No hits returns `base` unchanged. Otherwise the slugs matching
/// `base-<integer>` (strict: the whole remainder must be a base-10 integer)
/// are scanned for the highest suffix `N`, and `base-(N+1)` is returned; an
/// exact `base` hit contributes no number, so a lone `base` yields `base-1`.
pub fn next_slug(base: &str, existing: &[String]) -> String {
    if existing.is_empty() {
        return base.to_string();
    }

    let mut max_suffix: i64 = 0;
    for slug in existing {
        if slug == base {
            continue;
        }
        let Some(rest) = slug.strip_prefix(base) else {
            continue;
        };
        let Some(number) = rest.strip_prefix('-') else {
            continue;
        };
        if let Ok(n) = number.parse::<i64>() {
            if n > max_suffix {
                max_suffix = n;
            }
        }
    }

    format!("{}-{}", base, max_suffix + 1)
}
