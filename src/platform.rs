//! Platform name normalization.
//!
//! The collector writes the platform field as free text, so one platform
//! shows up under several spellings (Korean, romanized, spaced, with site
//! suffixes). Reports group by the canonical name after alias resolution;
//! labels that match no known platform pass through unchanged, so unknown
//! platforms are kept rather than merged or dropped.

use std::collections::BTreeSet;

/// Canonical name for rows with a blank platform field.
pub const UNCLASSIFIED: &str = "Unclassified";

/// Canonical name → known variants, all lowercase. Matching is
/// case-insensitive and substring-based; entries are tried in order and the
/// first match wins, so the order of this table is part of the contract.
const PLATFORM_ALIASES: &[(&str, &[&str])] = &[
    ("Munpia", &["munpia", "문피아", "문피아닷컴"]),
    ("Naver", &["naver", "네이버", "네이버시리즈", "네이버 시리즈"]),
    ("Kakao", &["kakao", "카카오", "카카오페이지", "카카오 페이지"]),
    ("Ridi", &["ridi", "리디", "리디북스"]),
    ("Novelpia", &["novelpia", "노벨피아"]),
];

/// Fixed ordering of the tracked platforms in report sections.
pub const PLATFORM_ORDER: &[&str] = &["Kakao", "Naver", "Munpia", "Ridi", "Novelpia"];

/// Resolve a raw platform label to its canonical name.
pub fn normalize(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return UNCLASSIFIED.to_string();
    }

    let lower = trimmed.to_lowercase();
    for (canonical, variants) in PLATFORM_ALIASES {
        if variants.iter().any(|v| lower.contains(v)) {
            return (*canonical).to_string();
        }
    }
    trimmed.to_string()
}

/// Order platform names for display: tracked platforms first in their fixed
/// order, anything else alphabetically after.
pub fn display_order(seen: &BTreeSet<String>) -> Vec<String> {
    let mut ordered: Vec<String> = PLATFORM_ORDER
        .iter()
        .filter(|p| seen.contains(**p))
        .map(|p| (*p).to_string())
        .collect();
    for name in seen {
        if !PLATFORM_ORDER.contains(&name.as_str()) {
            ordered.push(name.clone());
        }
    }
    ordered
}

#[cfg(test)]
#[path = "platform_test.rs"]
mod tests;
