//! Last-name key folding.
//!
//! Secondary keys are compared case-insensitively by lowercasing both the
//! stored keys and every query prefix.

/// Sentinel appended to a prefix to bound a range scan from above.
///
/// `char::MAX` encodes to the largest UTF-8 lead byte any scalar value can
/// have, so `prefix + PREFIX_SENTINEL` sorts after every string that starts
/// with `prefix` and continues with any character below U+10FFFF.
pub const PREFIX_SENTINEL: char = char::MAX;

/// Case-folds a last name into its index key.
///
/// Folds one character at a time without context, so the folded form of a
/// prefix is always a prefix of the folded form of the full name.
pub fn fold_key(raw: &str) -> String {
    raw.chars().flat_map(char::to_lowercase).collect()
}

/// Inclusive upper bound for a range scan over keys starting with `prefix`.
///
/// The bound is an approximation; callers re-check `starts_with` on each
/// visited key.
pub fn prefix_upper_bound(prefix: &str) -> String {
    let mut bound = String::with_capacity(prefix.len() + PREFIX_SENTINEL.len_utf8());
    bound.push_str(prefix);
    bound.push(PREFIX_SENTINEL);
    bound
}
