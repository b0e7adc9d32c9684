//! Command shape validation.
//!
//! Checks the structural invariants of a resolved command tree before any
//! token is parsed: positional input ordering, at most one variadic input,
//! no optional/variadic mix, and unique argument and subcommand names.
//! The `help` name and the `h` short alias are reserved for help requests.
//! Every node of a group tree is checked independently; the first problem
//! found is returned.
//!
//! # Examples
//!
//! ```
//! use cmdline_core::*;
//!
//! struct Sum {
//!     numbers: VariadicInput<i64>,
//!     first: RequiredInput<i64>,
//! }
//!
//! impl Command for Sum {
//!     fn description(&self) -> &str {
//!         "Adds numbers"
//!     }
//!
//!     fn declare(&mut self) -> Declaration<'_> {
//!         arguments!(self; numbers, first)
//!     }
//! }
//!
//! let mut sum = Sum {
//!     numbers: VariadicInput::new("Numbers"),
//!     first: RequiredInput::new("First number"),
//! };
//! let node = CommandNode::build("sum", &mut sum).unwrap();
//! let err = validate_command(&node).unwrap_err();
//! assert!(matches!(err, CommandLineError::RequiredInputAfterVariadicInput { .. }));
//! ```

use std::collections::HashSet;

use crate::argument::InputKind;
use crate::error::{CommandLineError, Result};
use crate::node::CommandNode;

const HELP_NAME: &str = "help";
const HELP_SHORT: char = 'h';

/// Validates `node` and, for a group, every descendant.
///
/// # Errors
///
/// One of the shape errors (`RequiredInputAfterOptionalInput`,
/// `RequiredInputAfterVariadicInput`, `MultipleVariadicInputs`,
/// `ConflictingOptionalAndVariadicInputs`, `DuplicateArgument`,
/// `DuplicateSubcommand`) naming the offending command.
pub fn validate_command(node: &CommandNode) -> Result<()> {
    if node.is_group() {
        return validate_subcommands(node);
    }

    validate_inputs(node)?;
    validate_argument_names(node)
}

fn validate_subcommands(node: &CommandNode) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for child in node.children() {
        if !seen.insert(child.name.as_str()) {
            return Err(CommandLineError::DuplicateSubcommand {
                command: node.command_line(),
                subcommand: child.name.clone(),
            });
        }
        validate_command(child)?;
    }

    Ok(())
}

/// Walks inputs in declaration order, tracking the most permissive kind seen.
fn validate_inputs(node: &CommandNode) -> Result<()> {
    let command = || node.name.clone();
    let mut seen = InputKind::Required;

    for input in node.inputs() {
        let Some(kind) = input.input_kind() else {
            continue;
        };
        match (seen, kind) {
            (InputKind::Required, _) => seen = kind,
            (InputKind::Optional, InputKind::Optional) => {}
            (InputKind::Optional, InputKind::Required) => {
                return Err(CommandLineError::RequiredInputAfterOptionalInput {
                    command: command(),
                    input: input.name.clone(),
                });
            }
            (InputKind::Variadic, InputKind::Required) => {
                return Err(CommandLineError::RequiredInputAfterVariadicInput {
                    command: command(),
                    input: input.name.clone(),
                });
            }
            (InputKind::Variadic, InputKind::Variadic) => {
                return Err(CommandLineError::MultipleVariadicInputs { command: command() });
            }
            (InputKind::Optional, InputKind::Variadic)
            | (InputKind::Variadic, InputKind::Optional) => {
                return Err(CommandLineError::ConflictingOptionalAndVariadicInputs {
                    command: command(),
                });
            }
        }
    }

    Ok(())
}

/// `--help` and `-h` are matched before any declared flag or option, so a
/// flag or option spelled the same way is reported as a duplicate.
fn validate_argument_names(node: &CommandNode) -> Result<()> {
    let mut names = HashSet::new();
    let mut shorts = HashSet::from([HELP_SHORT]);

    for spec in node.arguments() {
        let shadows_help = spec.input_kind().is_none() && spec.name == HELP_NAME;
        if shadows_help || !names.insert(spec.name.as_str()) {
            return Err(CommandLineError::DuplicateArgument {
                command: node.name.clone(),
                argument: spec.name.clone(),
            });
        }
        if let Some(short) = spec.short {
            if !shorts.insert(short) {
                return Err(CommandLineError::DuplicateArgument {
                    command: node.name.clone(),
                    argument: format!("-{short}"),
                });
            }
        }
    }

    Ok(())
}
