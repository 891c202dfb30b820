/// Scores `query` against `target` in `[0, 1]`.
///
/// An empty query and any case-insensitive substring hit both score `1.0`.
/// Otherwise the target is walked once, left to right, consuming query
/// characters greedily in order. A full subsequence match scores
/// `matched / target_len`; anything less scores `0.0`.
///
/// The walk never backtracks, so it can under-rate an input that a smarter
/// alignment would match more densely. Ranking depends on this exact
/// behavior.
#[must_use]
pub fn score(query: &str, target: &str) -> f64 {
    if query.is_empty() {
        return 1.0;
    }

    let query_lower = query.to_lowercase();
    let target_lower = target.to_lowercase();
    if target_lower.contains(&query_lower) {
        return 1.0;
    }

    let query_chars: Vec<char> = query_lower.chars().collect();
    let mut matched = 0;
    let mut target_len = 0;
    for c in target_lower.chars() {
        target_len += 1;
        if matched < query_chars.len() && c == query_chars[matched] {
            matched += 1;
        }
    }

    if matched < query_chars.len() || target_len == 0 {
        return 0.0;
    }
    matched as f64 / target_len as f64
}

/// Plain case-insensitive containment, used when fuzzy matching is off.
pub fn contains_ignore_case(query: &str, target: &str) -> bool {
    query.is_empty() || target.to_lowercase().contains(&query.to_lowercase())
}
