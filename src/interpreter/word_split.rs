//! Word Splitting
//!
//! IFS-based word splitting of a raw input line into an ordered token
//! sequence. Every character of the IFS value is a delimiter; splitting is
//! on maximal delimiter runs, so consecutive delimiters never produce empty
//! tokens. There is no quoting or escaping: an IFS character always splits,
//! and a literal delimiter cannot be passed inside a token. This is a
//! documented limitation, not a defect.

/// Default IFS value: space, tab, newline.
pub const DEFAULT_IFS: &str = " \t\n";

/// Get the effective delimiter set from the `IFS` environment value.
/// Returns `DEFAULT_IFS` when IFS is undefined, or the actual value
/// (including the empty string, which disables splitting entirely).
pub fn effective_ifs(ifs: Option<String>) -> String {
    ifs.unwrap_or_else(|| DEFAULT_IFS.to_string())
}

/// Split a line into words on the given delimiter set.
///
/// Zero resulting tokens means the whole iteration is a no-op: control
/// returns directly to the prompt.
pub fn split_words(line: &str, ifs: &str) -> Vec<String> {
    line.split(|c: char| ifs.contains(c))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
