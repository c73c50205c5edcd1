use std::collections::BTreeSet;
use strsim::normalized_levenshtein;

/// Compute a token-set similarity ratio between two strings (0-100).
///
/// Both inputs are lowercased and split on non-alphanumeric characters.
/// The sorted token intersection and the two intersection+difference
/// combinations are compared pairwise by normalized Levenshtein
/// similarity, and the best ratio wins. Shared tokens dominate the
/// result, so word order and extra words in multi-word sector names
/// matter less than raw edit distance would suggest.
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let sect: Vec<&str> = tokens_a.intersection(&tokens_b).map(String::as_str).collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).map(String::as_str).collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).map(String::as_str).collect();

    let sect_only = sect.join(" ");
    let sect_plus_ab = [&sect[..], &diff_ab[..]].concat().join(" ");
    let sect_plus_ba = [&sect[..], &diff_ba[..]].concat().join(" ");

    ratio(&sect_only, &sect_plus_ab)
        .max(ratio(&sect_only, &sect_plus_ba))
        .max(ratio(&sect_plus_ab, &sect_plus_ba))
}

/// Score a free-text skill against candidate sector names (0.0-1.0).
///
/// Returns the maximum token-set similarity over all candidates, or 0.0
/// for an empty candidate list. Exact matches score 1.0 through the same
/// fuzzy path; there is no exact-match shortcut.
pub fn score_skill<'a, I>(skill: &str, sector_names: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    sector_names
        .into_iter()
        .map(|name| f64::from(token_set_ratio(skill, name)) / 100.0)
        .fold(0.0, f64::max)
}

fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[inline]
fn ratio(a: &str, b: &str) -> u32 {
    if a.is_empty() && b.is_empty() {
        return 0;
    }
    (normalized_levenshtein(a, b) * 100.0).round() as u32
}
