//! Word Expansion
//!
//! Per-token tilde and special-parameter expansion, applied between word
//! splitting and parsing. Order is fixed: a leading `~/` first, then `$$`,
//! `$?`, `$!`.

use std::collections::TryReserveError;

use crate::interpreter::types::ShellState;

/// Global literal substitution.
///
/// Scans left to right, replacing each leftmost non-overlapping match and
/// resuming immediately after the inserted replacement, so replacement text
/// is never re-scanned. Capacity is acquired with `try_reserve`, making
/// allocation failure an error value instead of an abort; the caller treats
/// it as shell-fatal. An empty pattern returns the input unchanged.
pub fn str_gsub(haystack: &str, pattern: &str, replacement: &str) -> Result<String, TryReserveError> {
    let mut expanded = String::new();
    expanded.try_reserve(haystack.len())?;

    if pattern.is_empty() {
        expanded.push_str(haystack);
        return Ok(expanded);
    }

    let mut rest = haystack;
    while let Some(idx) = rest.find(pattern) {
        expanded.try_reserve(idx + replacement.len())?;
        expanded.push_str(&rest[..idx]);
        expanded.push_str(replacement);
        rest = &rest[idx + pattern.len()..];
    }
    expanded.try_reserve(rest.len())?;
    expanded.push_str(rest);
    Ok(expanded)
}

/// Apply tilde expansion to a token.
///
/// Only a `~` that is literally the first character and followed by `/` is
/// expanded; the `~` is replaced by `home` (the HOME value, empty string
/// when unset). Runs once per token, before the `$`-expansions. `~user`
/// forms are not recognized.
fn expand_tilde(token: &str, home: &str) -> Result<String, TryReserveError> {
    let mut expanded = String::new();
    expanded.try_reserve_exact(home.len() + token.len() - 1)?;
    expanded.push_str(home);
    expanded.push_str(&token[1..]);
    Ok(expanded)
}

/// Expand one token in the fixed order: `~/`, `$$`, `$?`, `$!`.
pub fn expand_token(token: &str, home: &str, state: &ShellState) -> Result<String, TryReserveError> {
    let bytes = token.as_bytes();
    let mut word = if bytes.first() == Some(&b'~') && bytes.get(1) == Some(&b'/') {
        expand_tilde(token, home)?
    } else {
        let mut copy = String::new();
        copy.try_reserve_exact(token.len())?;
        copy.push_str(token);
        copy
    };

    word = str_gsub(&word, "$$", &state.shell_pid.as_raw().to_string())?;
    word = str_gsub(&word, "$?", &state.last_status.to_string())?;
    let background_pid = state
        .last_background_pid
        .map(|pid| pid.as_raw().to_string())
        .unwrap_or_default();
    word = str_gsub(&word, "$!", &background_pid)?;
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::unistd::Pid;

    fn make_state(pid: i32, status: i32, background: Option<i32>) -> ShellState {
        ShellState {
            shell_pid: Pid::from_raw(pid),
            last_status: status,
            last_background_pid: background.map(Pid::from_raw),
        }
    }

    #[test]
    fn test_gsub_basic() {
        assert_eq!(str_gsub("a$$b$$c", "$$", "42").unwrap(), "a42b42c");
    }

    #[test]
    fn test_gsub_absent_pattern_is_identity() {
        let input = "no match here";
        let output = str_gsub(input, "$?", "7").unwrap();
        assert_eq!(output, input);
        assert_eq!(output.len(), input.len());
    }

    #[test]
    fn test_gsub_replacement_never_rescanned() {
        // A replacement containing the pattern must not grow unboundedly.
        assert_eq!(str_gsub("aa", "a", "aa").unwrap(), "aaaa");
    }

    #[test]
    fn test_gsub_shrinking_replacement() {
        assert_eq!(str_gsub("x$!y$!", "$!", "").unwrap(), "xy");
    }

    #[test]
    fn test_gsub_empty_pattern() {
        assert_eq!(str_gsub("abc", "", "zz").unwrap(), "abc");
    }

    #[test]
    fn test_expand_special_parameters() {
        let state = make_state(4242, 7, None);
        let tokens = ["echo", "hi", "$$", "$?"];
        let expanded: Vec<String> = tokens
            .iter()
            .map(|t| expand_token(t, "/home/u", &state).unwrap())
            .collect();
        assert_eq!(expanded, vec!["echo", "hi", "4242", "7"]);
    }

    #[test]
    fn test_expand_embedded_parameters() {
        let state = make_state(100, 7, None);
        assert_eq!(expand_token("a$?b", "", &state).unwrap(), "a7b");
    }

    #[test]
    fn test_expand_background_pid() {
        let unset = make_state(1, 0, None);
        assert_eq!(expand_token("$!", "", &unset).unwrap(), "");

        let set = make_state(1, 0, Some(5150));
        assert_eq!(expand_token("$!", "", &set).unwrap(), "5150");
    }

    #[test]
    fn test_expand_tilde_slash() {
        let state = make_state(1, 0, None);
        assert_eq!(expand_token("~/", "/home/u", &state).unwrap(), "/home/u/");
        assert_eq!(expand_token("~/src", "/home/u", &state).unwrap(), "/home/u/src");
    }

    #[test]
    fn test_expand_tilde_empty_home() {
        let state = make_state(1, 0, None);
        assert_eq!(expand_token("~/src", "", &state).unwrap(), "/src");
    }

    #[test]
    fn test_tilde_requires_leading_slash_pair() {
        let state = make_state(1, 0, None);
        // Not literally "~" then "/": unchanged.
        assert_eq!(expand_token("~user", "/home/u", &state).unwrap(), "~user");
        assert_eq!(expand_token("~", "/home/u", &state).unwrap(), "~");
        assert_eq!(expand_token("a~/b", "/home/u", &state).unwrap(), "a~/b");
    }

    #[test]
    fn test_tilde_runs_before_dollar_expansions() {
        let state = make_state(9, 0, None);
        assert_eq!(expand_token("~/p$$", "/h", &state).unwrap(), "/h/p9");
    }
}
