//! Token classification.
//!
//! Turns one raw token into a [`ParserEvent`] given the current state and
//! the node being filled. Positional slots are taken from the context here,
//! so the next token already sees the remaining slots.

use cmdline_core::CommandNode;
use tracing::trace;

use crate::machine::{ParserContext, ParserEvent, ParserState};

/// Whether `token` has the shape of a flag or option (`-x`, `--name`).
pub fn is_flag_or_option(token: &str) -> bool {
    token.starts_with('-')
}

pub fn is_help(token: &str) -> bool {
    token == "--help" || token == "-h"
}

/// Classifies `token` against the state reached by the previous tokens.
pub fn classify<'t>(
    state: &ParserState<'t>,
    token: &str,
    context: &mut ParserContext<'t>,
) -> ParserEvent<'t> {
    let node = context.current();
    let event = match state {
        ParserState::Command | ParserState::ParsedSubcommand(_) => {
            if is_flag_or_option(token) {
                scan_flag_or_option(token, node)
            } else if let Some(child) = node.subcommand(token) {
                ParserEvent::ScannedSubcommand(child)
            } else {
                scan_input(token, context)
            }
        }
        ParserState::ParsedFlag(_) | ParserState::ParsedOptionValue(..) => {
            if is_flag_or_option(token) {
                scan_flag_or_option(token, node)
            } else {
                scan_input(token, context)
            }
        }
        ParserState::ParsedOption(option) => {
            if is_flag_or_option(token) {
                ParserEvent::ScannedUnexpectedArgument
            } else {
                ParserEvent::ScannedOptionValue(*option, token.to_string())
            }
        }
        ParserState::ParsedInput(..) => {
            if is_flag_or_option(token) {
                ParserEvent::ScannedUnexpectedArgument
            } else {
                scan_input(token, context)
            }
        }
        ParserState::Failure(_) | ParserState::Success(_) => ParserEvent::ScannedUnexpectedArgument,
    };

    trace!(token, state = state.name(), event = event.name(), "Classified token");
    event
}

fn scan_flag_or_option<'t>(token: &str, node: &'t CommandNode) -> ParserEvent<'t> {
    if is_help(token) {
        return ParserEvent::ScannedHelpFlag(node);
    }
    if let Some(flag) = node.find_flag(token) {
        return ParserEvent::ScannedFlag(flag);
    }
    if let Some(option) = node.find_option(token) {
        return ParserEvent::ScannedOption(option);
    }
    ParserEvent::ScannedInvalidFlagOrOption
}

fn scan_input<'t>(token: &str, context: &mut ParserContext<'t>) -> ParserEvent<'t> {
    match context.take_input() {
        Some(input) => ParserEvent::ScannedInput(input, token.to_string()),
        None => ParserEvent::ScannedUnexpectedArgument,
    }
}
