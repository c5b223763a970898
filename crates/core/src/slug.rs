//! URL slug derivation for doctors and other named content.

/// Derive a URL slug from a display name.
///
/// Lowercases, maps runs of non-alphanumeric characters to single hyphens,
/// and strips leading/trailing hyphens. `"Dr. Ayesha Rahman"` becomes
/// `"dr-ayesha-rahman"`.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            out.push('-');
            last_was_hyphen = true;
        }
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Produce the `n`-th candidate for a contested slug: the base itself for
/// `n == 1`, then `base-2`, `base-3`, ...
pub fn nth_candidate(base: &str, n: u32) -> String {
    if n <= 1 {
        base.to_string()
    } else {
        format!("{base}-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Dr. Ayesha Rahman"), "dr-ayesha-rahman");
        assert_eq!(slugify("  Cardiology & ENT  "), "cardiology-ent");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn slugify_collapses_symbol_runs() {
        assert_eq!(slugify("a---b!!c"), "a-b-c");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn candidates_are_suffixed_from_two() {
        assert_eq!(nth_candidate("dr-rahman", 1), "dr-rahman");
        assert_eq!(nth_candidate("dr-rahman", 2), "dr-rahman-2");
        assert_eq!(nth_candidate("dr-rahman", 3), "dr-rahman-3");
    }
}
