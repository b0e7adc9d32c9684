//! Command model, tree resolution, value conversion and help formatting for
//! command-line parsing.
//!
//! This crate defines everything the parser works against:
//!
//! - [`ArgumentValue`]: conversion of raw tokens into typed values
//!   (numbers, strings, paths, [`Uri`], arrays, maps, optionals).
//! - Argument cells: [`Flag`], [`ValueOption`], [`RequiredInput`],
//!   [`OptionalInput`] and [`VariadicInput`] store a declared argument's
//!   descriptor next to its bound value.
//! - [`Command`]: a user-declared command that returns a [`Declaration`],
//!   either its arguments (a leaf) or its subcommands (a group).
//! - [`CommandNode`]: the resolved, owned snapshot of a command tree used
//!   for lookup, validation ([`validate_command`]) and help text
//!   ([`UsageFormatter`]).
//! - [`CommandLineError`]: the closed set of failures.
//!
//! # Example
//!
//! ```
//! use cmdline_core::*;
//!
//! struct Build {
//!     verbose: Flag,
//!     branch: RequiredInput<String>,
//! }
//!
//! impl Command for Build {
//!     fn description(&self) -> &str {
//!         "Builds a branch"
//!     }
//!
//!     fn declare(&mut self) -> Declaration<'_> {
//!         arguments!(self; verbose, branch)
//!     }
//! }
//!
//! struct Bot {
//!     build: Build,
//! }
//!
//! impl Command for Bot {
//!     fn description(&self) -> &str {
//!         "Build bot"
//!     }
//!
//!     fn declare(&mut self) -> Declaration<'_> {
//!         subcommands!(self; build)
//!     }
//! }
//!
//! let mut bot = Bot {
//!     build: Build {
//!         verbose: Flag::new("Verbose output").with_short('v'),
//!         branch: RequiredInput::new("Branch to build"),
//!     },
//! };
//!
//! let node = CommandNode::build("bot", &mut bot).unwrap();
//! assert!(validate_command(&node).is_ok());
//!
//! let build = node.descendant(&["build"]).unwrap();
//! assert_eq!(build.command_line(), "bot build");
//! assert!(build.usage().starts_with("OVERVIEW: Builds a branch"));
//! ```

mod argument;
mod command;
mod error;
mod node;
mod usage;
mod validate;
mod value;

pub use argument::{
    Argument, ArgumentCell, ArgumentKind, Flag, InputKind, OptionalInput, RequiredInput,
    ValueOption, VariadicInput,
};
pub use command::{
    Command, Declaration, NamedArgument, RunResult, Subcommand, bind_argument, declared_name,
    resolve_command,
};
pub use error::{CommandLineError, Result};
pub use node::{ArgumentSpec, CommandNode, NodeKind};
pub use usage::UsageFormatter;
pub use validate::validate_command;
pub use value::{ArgumentValue, Uri};
