//! Pipeline splitter
//!
//! Splits a token sequence on the exact token `|` into per-stage token
//! slices. Empty stages — a leading/trailing `|`, or two in a row — are
//! dropped rather than surfaced as a syntax error; downstream code can then
//! assume every surviving stage has at least one raw token to parse
//! redirections from.

/// Split `tokens` on `|`, dropping any resulting empty segments.
pub fn split_pipeline(tokens: &[String]) -> Vec<Vec<String>> {
    tokens
        .split(|t| t == "|")
        .map(|segment| segment.to_vec())
        .filter(|segment| !segment.is_empty())
        .collect()
}
