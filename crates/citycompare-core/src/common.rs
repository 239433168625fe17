// crates/citycompare-core/src/common.rs

//! Small text helpers shared by the resolver, the country table and the
//! renderer.

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Türkiye` -> `Turkiye`)
/// 2\) Normalize to lowercase and trim
///
/// ```rust
/// use citycompare_core::common::fold_key;
///
/// assert_eq!(fold_key(" Türkiye "), "turkiye");
/// assert_eq!(fold_key("CÔTE D'IVOIRE"), "cote d'ivoire");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s.trim()).to_lowercase()
}

/// Accent- and case-insensitive equality on [`fold_key`].
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Format an integer with `,` as thousands separator (`8000000` -> `8,000,000`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round a non-negative float and group it like [`group_thousands`].
///
/// Negative and non-finite values render as `0`; callers only pass
/// distances and areas here.
pub fn group_rounded(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }
    group_thousands(value.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(8_000_000), "8,000,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn groups_rounded_floats() {
        assert_eq!(group_rounded(621.371), "621");
        assert_eq!(group_rounded(10007.54), "10,008");
        assert_eq!(group_rounded(f64::NAN), "0");
    }

    #[test]
    fn folds_accents_and_case() {
        assert!(equals_folded("México", "mexico"));
        assert!(!equals_folded("Berlin", "Paris"));
    }
}
