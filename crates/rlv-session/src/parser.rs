//! Tokenizer for inbound protocol messages.
//!
//! Grammar: `[@]behavior[:option]=param[,behavior[:option]=param…]`.
//! Behavior names are case-insensitive; `,`, `:`, and `=` are the only
//! significant separators. Malformed segments are skipped, never fatal:
//! the rest of the message still parses, and command order is preserved
//! because later commands may depend on earlier ones' side effects.

use tracing::debug;

/// One parsed command invocation, in message order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Behavior name, lowercased.
    pub behavior: String,
    /// Option between `:` and `=`, original case. Empty options parse as
    /// `None`.
    pub option: Option<String>,
    /// Parameter after `=`, original case; empty when the segment carried
    /// no `=` (e.g. a bare `@clear`).
    pub param: String,
}

/// Tokenize one raw message into its ordered command list.
///
/// Unknown behavior names are forwarded untouched; deciding what is
/// recognized is the dispatcher's job. Returns an empty list when nothing
/// parses.
pub fn parse_message(raw: &str) -> Vec<ParsedCommand> {
    let mut commands = Vec::new();
    for segment in raw.trim().split(',') {
        let segment = segment.trim().trim_start_matches('@').trim();
        if segment.is_empty() {
            continue;
        }
        let (head, param) = match segment.split_once('=') {
            Some((head, param)) => (head, param),
            None => (segment, ""),
        };
        let (name, option) = match head.split_once(':') {
            Some((name, option)) => (name, Some(option)),
            None => (head, None),
        };
        let behavior = name.trim().to_ascii_lowercase();
        if behavior.is_empty() {
            debug!(segment, "skipping malformed command segment");
            continue;
        }
        let option = option
            .map(str::trim)
            .filter(|opt| !opt.is_empty())
            .map(str::to_owned);
        commands.push(ParsedCommand {
            behavior,
            option,
            param: param.trim().to_owned(),
        });
    }
    commands
}
