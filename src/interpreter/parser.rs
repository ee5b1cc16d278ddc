//! Command Line Parsing
//!
//! Turns the expanded token sequence into a `Command` descriptor: strips a
//! trailing comment, detects the background marker, and extracts redirection
//! operator/target pairs. Returns `None` when the line reduces to nothing —
//! the iteration is a no-op and the command name is never inspected.

use crate::interpreter::types::Command;

/// Tokens that can never be a redirection target.
fn is_operator(token: &str) -> bool {
    matches!(token, "<" | ">" | "&")
}

/// Parse an expanded token sequence into a command descriptor.
///
/// Steps, in order:
/// 1. A token exactly `#` discards itself and every following token.
/// 2. Zero remaining tokens: no-op.
/// 3. A final token exactly `&` is removed and marks the command background.
/// 4. A `<` or `>` token immediately followed by a non-operator target is
///    recognized only in the final two or final four remaining slots, with
///    the operator at index 1 or later. At most one `<` pair and one `>`
///    pair are extracted, in either relative order. When both slots carry
///    the same operator kind the earlier pair wins and the later pair stays
///    in argv as literal tokens.
/// 5. Whatever remains becomes argv; zero remaining tokens is again a no-op.
pub fn parse_tokens(mut tokens: Vec<String>) -> Option<Command> {
    if let Some(pos) = tokens.iter().position(|t| t == "#") {
        tokens.truncate(pos);
    }
    if tokens.is_empty() {
        return None;
    }

    let mut background = false;
    if tokens.last().map(|t| t == "&") == Some(true) {
        tokens.pop();
        background = true;
    }

    // Candidate operator slots: final-two first, then final-four, so a
    // repeated operator kind resolves to the earlier pair.
    let mut input_slot: Option<usize> = None;
    let mut output_slot: Option<usize> = None;
    let len = tokens.len();
    if len > 2 {
        let mut candidates = vec![len - 2];
        if len >= 5 {
            candidates.push(len - 4);
        }
        for idx in candidates {
            if idx < 1 || is_operator(&tokens[idx + 1]) {
                continue;
            }
            match tokens[idx].as_str() {
                "<" => input_slot = Some(idx),
                ">" => output_slot = Some(idx),
                _ => {}
            }
        }
    }

    let mut input_file = None;
    let mut output_file = None;
    let mut pairs: Vec<(usize, bool)> = Vec::new();
    if let Some(idx) = input_slot {
        pairs.push((idx, true));
    }
    if let Some(idx) = output_slot {
        pairs.push((idx, false));
    }
    // Remove the higher-indexed pair first so the lower index stays valid.
    pairs.sort_by(|a, b| b.0.cmp(&a.0));
    for (idx, is_input) in pairs {
        let target = tokens.remove(idx + 1);
        tokens.remove(idx);
        if is_input {
            input_file = Some(target);
        } else {
            output_file = Some(target);
        }
    }

    if tokens.is_empty() {
        return None;
    }

    Some(Command {
        argv: tokens,
        input_file,
        output_file,
        background,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_simple_command() {
        let command = parse_tokens(toks(&["ls", "-l"])).unwrap();
        assert_eq!(command.argv, vec!["ls", "-l"]);
        assert_eq!(command.input_file, None);
        assert_eq!(command.output_file, None);
        assert!(!command.background);
    }

    #[test]
    fn test_output_redirection() {
        let command = parse_tokens(toks(&["ls", "-l", ">", "out.txt"])).unwrap();
        assert_eq!(command.argv, vec!["ls", "-l"]);
        assert_eq!(command.output_file.as_deref(), Some("out.txt"));
        assert!(!command.background);
    }

    #[test]
    fn test_background_marker() {
        let command = parse_tokens(toks(&["sleep", "5", "&"])).unwrap();
        assert_eq!(command.argv, vec!["sleep", "5"]);
        assert!(command.background);
    }

    #[test]
    fn test_both_redirections_either_order() {
        let command = parse_tokens(toks(&["sort", "<", "in.txt", ">", "out.txt"])).unwrap();
        assert_eq!(command.argv, vec!["sort"]);
        assert_eq!(command.input_file.as_deref(), Some("in.txt"));
        assert_eq!(command.output_file.as_deref(), Some("out.txt"));

        let command = parse_tokens(toks(&["sort", ">", "out.txt", "<", "in.txt"])).unwrap();
        assert_eq!(command.argv, vec!["sort"]);
        assert_eq!(command.input_file.as_deref(), Some("in.txt"));
        assert_eq!(command.output_file.as_deref(), Some("out.txt"));
    }

    #[test]
    fn test_redirection_with_background() {
        let command = parse_tokens(toks(&["wc", "<", "words.txt", "&"])).unwrap();
        assert_eq!(command.argv, vec!["wc"]);
        assert_eq!(command.input_file.as_deref(), Some("words.txt"));
        assert!(command.background);
    }

    #[test]
    fn test_comment_strips_rest_of_line() {
        let command = parse_tokens(toks(&["echo", "hi", "#", "ignored", ">", "f"])).unwrap();
        assert_eq!(command.argv, vec!["echo", "hi"]);
        assert_eq!(command.output_file, None);
    }

    #[test]
    fn test_comment_token_must_match_exactly() {
        let command = parse_tokens(toks(&["echo", "#tag"])).unwrap();
        assert_eq!(command.argv, vec!["echo", "#tag"]);
    }

    #[test]
    fn test_noop_lines() {
        assert_eq!(parse_tokens(vec![]), None);
        assert_eq!(parse_tokens(toks(&["#", "whole", "line"])), None);
        // A bare `&` reduces to zero argv tokens: no-op, not an empty launch.
        assert_eq!(parse_tokens(toks(&["&"])), None);
    }

    #[test]
    fn test_operator_mid_argv_stays_literal() {
        let command = parse_tokens(toks(&["echo", ">", "x", "y", "z"])).unwrap();
        assert_eq!(command.argv, vec!["echo", ">", "x", "y", "z"]);
        assert_eq!(command.output_file, None);
    }

    #[test]
    fn test_operator_without_room_stays_literal() {
        // Two tokens: no slot for an operator/target pair.
        let command = parse_tokens(toks(&["ls", ">"])).unwrap();
        assert_eq!(command.argv, vec!["ls", ">"]);
        assert_eq!(command.output_file, None);
    }

    #[test]
    fn test_operator_target_cannot_be_operator() {
        let command = parse_tokens(toks(&["ls", "<", ">"])).unwrap();
        assert_eq!(command.argv, vec!["ls", "<", ">"]);
        assert_eq!(command.input_file, None);
    }

    #[test]
    fn test_duplicate_operator_earlier_pair_wins() {
        let command = parse_tokens(toks(&["cmd", "<", "a", "<", "b"])).unwrap();
        assert_eq!(command.input_file.as_deref(), Some("a"));
        // The later pair is left behind as literal argv tokens.
        assert_eq!(command.argv, vec!["cmd", "<", "b"]);
    }

    #[test]
    fn test_operator_at_index_zero_not_recognized() {
        let command = parse_tokens(toks(&["<", "in.txt"])).unwrap();
        assert_eq!(command.argv, vec!["<", "in.txt"]);
        assert_eq!(command.input_file, None);
    }
}
