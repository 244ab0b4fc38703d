//! URL slug derivation for category and subcategory names.

/// Derive a URL slug from a display name.
///
/// Lowercases the input, drops apostrophes entirely (so "Men's" becomes
/// "mens", not "men-s"), and collapses every other run of non-alphanumeric
/// characters into a single hyphen. The result never starts or ends with a
/// hyphen.
///
/// ```
/// use vendora_core::slug::slugify;
///
/// assert_eq!(slugify("Men's & Boys' Wear!"), "mens-boys-wear");
/// assert_eq!(slugify("Home & Kitchen"), "home-kitchen");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c == '\'' || c == '\u{2019}' {
            continue;
        }
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_punctuation_and_case() {
        assert_eq!(slugify("Men's & Boys' Wear!"), "mens-boys-wear");
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(slugify("Electronics"), "electronics");
    }

    #[test]
    fn test_ampersand_name() {
        assert_eq!(slugify("Home & Kitchen"), "home-kitchen");
    }

    #[test]
    fn test_no_leading_or_trailing_hyphens() {
        assert_eq!(slugify("  --Fancy Stuff--  "), "fancy-stuff");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("Audio   and\tVideo"), "audio-and-video");
    }

    #[test]
    fn test_unicode_apostrophe_dropped() {
        assert_eq!(slugify("Women\u{2019}s Clothing"), "womens-clothing");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
