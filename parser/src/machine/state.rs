use cmdline_core::{ArgumentSpec, CommandLineError, CommandNode};

/// Where the parser stands after the tokens consumed so far.
#[derive(Debug, Clone)]
pub enum ParserState<'t> {
    /// Initial state, positioned at the root node.
    Command,
    ParsedSubcommand(&'t CommandNode),
    ParsedFlag(&'t ArgumentSpec),
    /// An option name was matched; its value must come next.
    ParsedOption(&'t ArgumentSpec),
    ParsedOptionValue(&'t ArgumentSpec, String),
    ParsedInput(&'t ArgumentSpec, String),
    Failure(CommandLineError),
    /// Every token was accepted; carries the node parsing stopped at.
    Success(&'t CommandNode),
}

impl ParserState<'_> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ParserState::Failure(_) | ParserState::Success(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParserState::Command => "command",
            ParserState::ParsedSubcommand(_) => "parsed_subcommand",
            ParserState::ParsedFlag(_) => "parsed_flag",
            ParserState::ParsedOption(_) => "parsed_option",
            ParserState::ParsedOptionValue(..) => "parsed_option_value",
            ParserState::ParsedInput(..) => "parsed_input",
            ParserState::Failure(_) => "failure",
            ParserState::Success(_) => "success",
        }
    }
}
