use cmdline_core::{ArgumentSpec, CommandLineError, CommandNode};

/// Outcome of classifying one token, or of a failed binding.
#[derive(Debug, Clone)]
pub enum ParserEvent<'t> {
    ScannedSubcommand(&'t CommandNode),
    ScannedFlag(&'t ArgumentSpec),
    ScannedOption(&'t ArgumentSpec),
    ScannedOptionValue(&'t ArgumentSpec, String),
    ScannedInput(&'t ArgumentSpec, String),
    ScannedInvalidFlagOrOption,
    /// `-h` or `--help`, for the node that was current when it was read.
    ScannedHelpFlag(&'t CommandNode),
    ScannedUnexpectedArgument,
    ErrorWasThrown(CommandLineError),
    NoMoreArguments,
}

impl ParserEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            ParserEvent::ScannedSubcommand(_) => "scanned_subcommand",
            ParserEvent::ScannedFlag(_) => "scanned_flag",
            ParserEvent::ScannedOption(_) => "scanned_option",
            ParserEvent::ScannedOptionValue(..) => "scanned_option_value",
            ParserEvent::ScannedInput(..) => "scanned_input",
            ParserEvent::ScannedInvalidFlagOrOption => "scanned_invalid_flag_or_option",
            ParserEvent::ScannedHelpFlag(_) => "scanned_help_flag",
            ParserEvent::ScannedUnexpectedArgument => "scanned_unexpected_argument",
            ParserEvent::ErrorWasThrown(_) => "error_was_thrown",
            ParserEvent::NoMoreArguments => "no_more_arguments",
        }
    }
}
