// crates/citycompare-core/src/countries.rs

//! Static country-name → ISO 3166-1 alpha-2 table used by the growth lookup.
//!
//! Coverage is deliberately finite. A country that is not listed yields
//! `None`, and the growth series for it is simply absent.

use crate::common::fold_key;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// `(iso2, names)`; the first name is the canonical English one, the rest
/// are aliases geocoders are known to return.
const COUNTRY_CODES: &[(&str, &[&str])] = &[
    ("US", &["United States", "United States of America", "USA"]),
    ("GB", &["United Kingdom", "Great Britain", "UK"]),
    ("FR", &["France"]),
    ("DE", &["Germany", "Deutschland"]),
    ("IT", &["Italy"]),
    ("ES", &["Spain"]),
    ("JP", &["Japan"]),
    ("CN", &["China", "People's Republic of China"]),
    ("IN", &["India"]),
    ("BR", &["Brazil"]),
    ("CA", &["Canada"]),
    ("AU", &["Australia"]),
    ("RU", &["Russia", "Russian Federation"]),
    ("MX", &["Mexico"]),
    ("KR", &["South Korea", "Republic of Korea", "Korea"]),
    ("ID", &["Indonesia"]),
    ("TR", &["Turkey", "Türkiye"]),
    ("SA", &["Saudi Arabia"]),
    ("AR", &["Argentina"]),
    ("ZA", &["South Africa"]),
    ("NG", &["Nigeria"]),
    ("EG", &["Egypt"]),
];

static BY_NAME: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    COUNTRY_CODES
        .iter()
        .flat_map(|(code, names)| names.iter().map(move |n| (fold_key(n), *code)))
        .collect()
});

/// Look up the alpha-2 code for a country name (accent/case-insensitive).
pub fn code_for_country(name: &str) -> Option<&'static str> {
    BY_NAME.get(&fold_key(name)).copied()
}

/// Canonical names of every supported country.
pub fn supported_countries() -> impl Iterator<Item = &'static str> {
    COUNTRY_CODES.iter().map(|(_, names)| names[0])
}
