//! Parser entry points.

use std::path::Path;

use cmdline_core::{
    Command, CommandLineError, CommandNode, Result, RunResult, UsageFormatter, resolve_command,
    validate_command,
};
use tracing::debug;

use crate::machine::{ParserState, ParserStateMachine};

/// Parses command lines against user-declared commands.
///
/// Every call resolves the command tree afresh, so one parser (and one
/// command value) can be reused for any number of parses.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandLineParser {
    formatter: UsageFormatter,
}

impl CommandLineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the formatter used by [`usage`](Self::usage).
    pub fn with_formatter(mut self, formatter: UsageFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Parses the process arguments. The root name is taken from the
    /// executable path and is not checked.
    pub fn parse<'a>(&self, command: &'a mut dyn Command) -> Result<ParsedCommand<'a>> {
        let arguments: Vec<String> = std::env::args().collect();
        let (name, tokens) = split_arguments(&arguments)?;
        self.parse_tokens(&name, tokens, command)
    }

    /// Parses `arguments`, whose first element is the executable.
    ///
    /// # Errors
    ///
    /// - [`NoExecutable`](CommandLineError::NoExecutable) if `arguments` is
    ///   empty or its first element names nothing.
    /// - [`UsageRequested`](CommandLineError::UsageRequested) for
    ///   `expected_root` when the executable name differs from it.
    /// - Any shape or parse error otherwise.
    pub fn parse_arguments<'a, S: AsRef<str>>(
        &self,
        arguments: &[S],
        command: &'a mut dyn Command,
        expected_root: &str,
    ) -> Result<ParsedCommand<'a>> {
        let (name, tokens) = split_arguments(arguments)?;
        if name != expected_root {
            debug!(name = %name, expected_root, "Root command mismatch");
            let node = CommandNode::build(expected_root, command)?;
            return Err(CommandLineError::UsageRequested(Box::new(node)));
        }
        self.parse_tokens(&name, tokens, command)
    }

    /// Resolves and validates the tree of `command` without parsing.
    pub fn describe(&self, command: &mut dyn Command, name: &str) -> Result<CommandNode> {
        let root = CommandNode::build(name, command)?;
        validate_command(&root)?;
        Ok(root)
    }

    /// Help text for the subcommand reached by following `path` from the root.
    pub fn usage(&self, command: &mut dyn Command, name: &str, path: &[&str]) -> Result<String> {
        let root = self.describe(command, name)?;
        let node = root.descendant(path)?;
        Ok(self.formatter.format(node))
    }

    fn parse_tokens<'a, S: AsRef<str>>(
        &self,
        name: &str,
        tokens: &[S],
        command: &'a mut dyn Command,
    ) -> Result<ParsedCommand<'a>> {
        let root = self.describe(command, name)?;
        debug!(command = name, tokens = tokens.len(), "Parsing command line");

        match ParserStateMachine::new(&root, &mut *command).run(tokens) {
            ParserState::Success(node) => {
                let node = node.clone();
                let command =
                    resolve_command(command, &node.path).ok_or(CommandLineError::UnexpectedError)?;
                Ok(ParsedCommand { command, node })
            }
            ParserState::Failure(error) => Err(error),
            _ => Err(CommandLineError::UnexpectedError),
        }
    }
}

/// Splits off the executable, keeping only its file name.
fn split_arguments<S: AsRef<str>>(arguments: &[S]) -> Result<(String, &[S])> {
    let (executable, tokens) = arguments
        .split_first()
        .ok_or(CommandLineError::NoExecutable)?;
    let name = Path::new(executable.as_ref())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.is_empty() {
        return Err(CommandLineError::NoExecutable);
    }
    Ok((name, tokens))
}

/// A successful parse: the bound command and its resolved node.
///
/// The command is normally a leaf. It is a group when the tokens stopped at
/// one (for example no tokens at all for a root group), in which case
/// callers usually print [`usage`](Self::usage).
pub struct ParsedCommand<'a> {
    command: &'a mut dyn Command,
    node: CommandNode,
}

impl<'a> ParsedCommand<'a> {
    pub fn command(&mut self) -> &mut dyn Command {
        &mut *self.command
    }

    pub fn node(&self) -> &CommandNode {
        &self.node
    }

    pub fn is_group(&self) -> bool {
        self.node.is_group()
    }

    pub fn usage(&self) -> String {
        self.node.usage()
    }

    /// Runs the bound command's action.
    pub fn run(self) -> RunResult {
        self.command.run()
    }

    pub fn into_parts(self) -> (&'a mut dyn Command, CommandNode) {
        (self.command, self.node)
    }
}
