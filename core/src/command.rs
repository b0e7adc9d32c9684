//! The command model.
//!
//! A command is a plain struct holding argument cells (or child commands)
//! and implementing [`Command`]. Instead of runtime reflection, it returns
//! an explicit [`Declaration`]: either the ordered list of its arguments
//! (a leaf) or the ordered list of its subcommands (a group). The
//! [`arguments!`](crate::arguments) and [`subcommands!`](crate::subcommands)
//! macros derive the declared names from the field names.

use std::error::Error;

use crate::argument::Argument;
use crate::error::{CommandLineError, Result};

/// Outcome of running a bound command's action.
pub type RunResult = std::result::Result<(), Box<dyn Error + Send + Sync>>;

/// A user-declared command or command group.
///
/// # Example
///
/// ```
/// use cmdline_core::{arguments, Command, Declaration, Flag, RequiredInput};
///
/// struct Build {
///     verbose: Flag,
///     branch: RequiredInput<String>,
/// }
///
/// impl Command for Build {
///     fn description(&self) -> &str {
///         "Builds a branch"
///     }
///
///     fn declare(&mut self) -> Declaration<'_> {
///         arguments!(self; verbose, branch)
///     }
/// }
///
/// let mut build = Build {
///     verbose: Flag::new("Verbose output").with_short('v'),
///     branch: RequiredInput::new("Branch to build"),
/// };
/// match build.declare() {
///     Declaration::Leaf(arguments) => {
///         let names: Vec<_> = arguments.iter().map(|a| a.name).collect();
///         assert_eq!(names, ["verbose", "branch"]);
///     }
///     Declaration::Group(_) => unreachable!(),
/// }
/// ```
pub trait Command {
    /// One-line description used in help text.
    fn description(&self) -> &str;

    /// Exposes the declared arguments or subcommands, in declaration order.
    ///
    /// Must return the same shape on every call.
    fn declare(&mut self) -> Declaration<'_>;

    /// Action executed after a successful parse. Groups keep the default.
    fn run(&mut self) -> RunResult {
        Ok(())
    }
}

/// What a command declares at its level: arguments or subcommands, never both.
pub enum Declaration<'a> {
    Leaf(Vec<NamedArgument<'a>>),
    Group(Vec<Subcommand<'a>>),
}

impl Declaration<'_> {
    pub fn is_group(&self) -> bool {
        matches!(self, Declaration::Group(_))
    }
}

/// A declared argument paired with its name.
pub struct NamedArgument<'a> {
    pub name: &'static str,
    pub argument: Argument<'a>,
}

impl<'a> NamedArgument<'a> {
    /// Pairs `argument` with `name`, trimmed of declaration decoration.
    pub fn new(name: &'static str, argument: impl Into<Argument<'a>>) -> Self {
        Self {
            name: declared_name(name),
            argument: argument.into(),
        }
    }
}

/// A named child of a command group.
pub struct Subcommand<'a> {
    pub name: &'static str,
    pub command: &'a mut dyn Command,
}

impl<'a> Subcommand<'a> {
    pub fn new(name: &'static str, command: &'a mut dyn Command) -> Self {
        Self {
            name: declared_name(name),
            command,
        }
    }
}

/// Strips a raw-identifier prefix and surrounding underscores.
///
/// ```
/// use cmdline_core::declared_name;
///
/// assert_eq!(declared_name("_port"), "port");
/// assert_eq!(declared_name("r#type"), "type");
/// assert_eq!(declared_name("dry_run"), "dry_run");
/// ```
pub fn declared_name(raw: &str) -> &str {
    raw.strip_prefix("r#").unwrap_or(raw).trim_matches('_')
}

/// Declares a leaf command's arguments from its fields.
///
/// `arguments!(self; verbose, port)` expands to a [`Declaration::Leaf`]
/// naming each argument after its field.
#[macro_export]
macro_rules! arguments {
    ($this:expr; $($field:ident),* $(,)?) => {
        $crate::Declaration::Leaf(vec![
            $($crate::NamedArgument::new(stringify!($field), &mut $this.$field)),*
        ])
    };
}

/// Declares a command group's children from its fields.
///
/// `subcommands!(self; build, branch)` expands to a [`Declaration::Group`]
/// naming each child after its field.
#[macro_export]
macro_rules! subcommands {
    ($this:expr; $($field:ident),* $(,)?) => {
        $crate::Declaration::Group(vec![
            $($crate::Subcommand::new(stringify!($field), &mut $this.$field)),*
        ])
    };
}

/// Walks `path` (child indices from the root) down a live declaration.
///
/// Returns `None` when the path leaves the declared tree.
pub fn resolve_command<'c>(
    command: &'c mut dyn Command,
    path: &[usize],
) -> Option<&'c mut dyn Command> {
    let Some((&first, rest)) = path.split_first() else {
        return Some(command);
    };
    match command.declare() {
        Declaration::Group(children) => {
            let child = children.into_iter().nth(first)?;
            resolve_command(child.command, rest)
        }
        Declaration::Leaf(_) => None,
    }
}

/// Binds `raw` to the argument at `index` of the leaf at `path`.
///
/// # Errors
///
/// [`UnexpectedError`](CommandLineError::UnexpectedError) if the declaration
/// no longer has that argument, otherwise the cell's conversion error.
pub fn bind_argument(
    command: &mut dyn Command,
    path: &[usize],
    index: usize,
    raw: &str,
) -> Result<()> {
    let target = resolve_command(command, path).ok_or(CommandLineError::UnexpectedError)?;
    let Declaration::Leaf(arguments) = target.declare() else {
        return Err(CommandLineError::UnexpectedError);
    };
    let mut named = arguments
        .into_iter()
        .nth(index)
        .ok_or(CommandLineError::UnexpectedError)?;
    named.argument.bind(raw)
}
