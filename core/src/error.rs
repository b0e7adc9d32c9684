//! The closed set of command-line failures.
//!
//! Every parse attempt ends in at most one [`CommandLineError`]. Shape errors
//! (`RequiredInputAfterOptionalInput` and friends) are raised before the
//! first token is read; the rest are raised by the parser state machine or
//! by value conversion while binding.

use thiserror::Error;

use crate::CommandNode;

/// Errors produced while declaring, resolving or parsing a command line.
///
/// The `Display` impl gives a one-line message, except for
/// [`UsageRequested`](CommandLineError::UsageRequested), which renders the
/// full help text of the node it carries.
///
/// # Examples
///
/// ```
/// use cmdline_core::CommandLineError;
///
/// let err = CommandLineError::InvalidFlagOrOption("--colour".into());
/// assert_eq!(err.to_string(), "invalid flag or option \"--colour\"");
/// assert_eq!(err.exit_code(), 1);
/// assert!(!err.is_usage_request());
/// ```
#[derive(Debug, Clone, Error)]
pub enum CommandLineError {
    /// The token list was empty, or its first element had no usable name.
    #[error("no executable name in the argument list")]
    NoExecutable,

    /// A token looked like a flag or option but matched no declared one.
    #[error("invalid flag or option \"{0}\"")]
    InvalidFlagOrOption(String),

    /// A token could not be classified in the current parser state.
    #[error("unexpected argument \"{0}\"")]
    UnexpectedArgument(String),

    /// An option was matched but no value followed it.
    #[error("missing value for option \"{0}\"")]
    MissingOptionValue(String),

    /// Input ended while a required positional input was still unfilled.
    #[error("missing value for input argument \"{0}\"")]
    MissingInputArgument(String),

    /// Value conversion or pattern validation failed for the given token.
    #[error("incorrect format for argument \"{0}\"")]
    InvalidArgumentFormat(String),

    /// A required positional input is declared after an optional one.
    #[error("the required input argument '{input}' must not follow an optional input argument in '{command}'")]
    RequiredInputAfterOptionalInput { command: String, input: String },

    /// A required positional input is declared after a variadic one.
    #[error("the required input argument '{input}' must not follow a variadic input argument in '{command}'")]
    RequiredInputAfterVariadicInput { command: String, input: String },

    /// A command declares more than one variadic positional input.
    #[error("there must only be one variadic input argument in '{command}'")]
    MultipleVariadicInputs { command: String },

    /// A command declares both an optional and a variadic positional input.
    #[error("the command '{command}' may not have both optional and variadic input arguments")]
    ConflictingOptionalAndVariadicInputs { command: String },

    /// Two arguments of one command share a long name or a short alias.
    #[error("duplicate argument '{argument}' in '{command}'")]
    DuplicateArgument { command: String, argument: String },

    /// Two subcommands of one group share a name.
    #[error("duplicate subcommand '{subcommand}' in '{command}'")]
    DuplicateSubcommand { command: String, subcommand: String },

    /// A declared validation pattern is not a valid regular expression.
    #[error("invalid validation pattern for '{argument}' in '{command}': {pattern}")]
    InvalidValidationPattern {
        command: String,
        argument: String,
        pattern: String,
    },

    /// Help was requested for the carried node (`-h`, `--help`, or a root
    /// name mismatch). Not a real failure.
    #[error("{}", .0.usage())]
    UsageRequested(Box<CommandNode>),

    /// A name did not match any subcommand of a group.
    #[error("there is no subcommand '{0}'")]
    NoSuchSubcommand(String),

    /// The declaration changed shape between resolution and binding.
    #[error("there was an unexpected error while parsing the command line")]
    UnexpectedError,
}

impl CommandLineError {
    /// Returns `true` for [`UsageRequested`](CommandLineError::UsageRequested).
    pub fn is_usage_request(&self) -> bool {
        matches!(self, CommandLineError::UsageRequested(_))
    }

    /// Conventional process exit status: `0` for usage requests, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_usage_request() { 0 } else { 1 }
    }
}

/// Convenience alias for results with [`CommandLineError`].
pub type Result<T> = std::result::Result<T, CommandLineError>;
