//! Command tree resolution.
//!
//! [`CommandNode::build`] walks a live [`Command`] once per parse and
//! produces an owned snapshot of its shape: names, parent chain, argument
//! descriptors and child nodes. The parser and the usage formatter work on
//! the snapshot; the live command is only touched again to bind values.

use regex::Regex;
use serde::Serialize;

use crate::argument::{ArgumentKind, InputKind};
use crate::command::{Command, Declaration, NamedArgument};
use crate::error::{CommandLineError, Result};
use crate::usage::UsageFormatter;

/// Resolved descriptor of one declared argument.
#[derive(Debug, Clone, Serialize)]
pub struct ArgumentSpec {
    /// Position in the owning command's declaration.
    #[serde(skip)]
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    pub description: String,
    pub kind: ArgumentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip)]
    regex: Option<Regex>,
}

impl ArgumentSpec {
    fn resolve(command: &str, index: usize, named: &mut NamedArgument<'_>) -> Result<Self> {
        let argument = &mut named.argument;
        argument.assign_name(named.name);
        argument.reset();

        let cell = argument.cell();
        let name = argument.name().unwrap_or(named.name).to_string();
        let pattern = cell.and_then(|cell| cell.pattern()).map(str::to_string);
        let regex = match &pattern {
            Some(pattern) => Some(Regex::new(pattern).map_err(|_| {
                CommandLineError::InvalidValidationPattern {
                    command: command.to_string(),
                    argument: name.clone(),
                    pattern: pattern.clone(),
                }
            })?),
            None => None,
        };
        let kind = argument.kind();

        Ok(Self {
            index,
            short: argument.short_name(),
            description: argument.description().to_string(),
            value_name: match kind {
                ArgumentKind::Option => cell.map(|cell| cell.value_name().to_string()),
                _ => None,
            },
            default_value: cell.and_then(|cell| cell.default_value()),
            name,
            kind,
            pattern,
            regex,
        })
    }

    pub fn is_flag(&self) -> bool {
        self.kind == ArgumentKind::Flag
    }

    pub fn is_option(&self) -> bool {
        self.kind == ArgumentKind::Option
    }

    /// Input kind, for positional inputs.
    pub fn input_kind(&self) -> Option<InputKind> {
        match self.kind {
            ArgumentKind::Input(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether `token` is this argument's long (`--name`) or short (`-x`) form.
    pub fn matches_token(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return long == self.name;
        }
        match (token.strip_prefix('-'), self.short) {
            (Some(rest), Some(short)) => {
                let mut chars = rest.chars();
                chars.next() == Some(short) && chars.next().is_none()
            }
            _ => false,
        }
    }

    /// Whether `raw` satisfies the validation pattern, if any.
    pub fn accepts(&self, raw: &str) -> bool {
        self.regex.as_ref().is_none_or(|regex| regex.is_match(raw))
    }
}

/// Arguments or children of a resolved node.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Leaf { arguments: Vec<ArgumentSpec> },
    Group { subcommands: Vec<CommandNode> },
}

/// A resolved command or command group.
///
/// # Example
///
/// ```
/// use cmdline_core::{arguments, Command, CommandNode, Declaration, Flag, ValueOption};
///
/// struct Server {
///     verbose: Flag,
///     port: ValueOption<u16>,
/// }
///
/// impl Command for Server {
///     fn description(&self) -> &str {
///         "Runs the server"
///     }
///
///     fn declare(&mut self) -> Declaration<'_> {
///         arguments!(self; verbose, port)
///     }
/// }
///
/// let mut server = Server {
///     verbose: Flag::new("Verbose logging"),
///     port: ValueOption::new(4040, "Port").with_short('p'),
/// };
/// let node = CommandNode::build("server", &mut server).unwrap();
///
/// assert!(node.find_option("-p").is_some());
/// assert!(node.find_flag("--verbose").is_some());
/// assert_eq!(node.options().next().unwrap().default_value.as_deref(), Some("4040"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CommandNode {
    pub name: String,
    pub parents: Vec<String>,
    pub description: String,
    /// Child indices leading from the root declaration to this one.
    #[serde(skip)]
    pub path: Vec<usize>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl CommandNode {
    /// Resolves `command` as a root node named `name`.
    ///
    /// Assigns every declared argument its name, resets bound values to
    /// their defaults and compiles validation patterns.
    ///
    /// # Errors
    ///
    /// [`InvalidValidationPattern`](CommandLineError::InvalidValidationPattern)
    /// for a pattern that is not a valid regular expression.
    pub fn build(name: &str, command: &mut dyn Command) -> Result<Self> {
        Self::build_at(name, command, Vec::new(), Vec::new())
    }

    fn build_at(
        name: &str,
        command: &mut dyn Command,
        parents: Vec<String>,
        path: Vec<usize>,
    ) -> Result<Self> {
        let description = command.description().to_string();
        let kind = match command.declare() {
            Declaration::Leaf(arguments) => {
                let mut specs = Vec::with_capacity(arguments.len());
                for (index, mut named) in arguments.into_iter().enumerate() {
                    specs.push(ArgumentSpec::resolve(name, index, &mut named)?);
                }
                NodeKind::Leaf { arguments: specs }
            }
            Declaration::Group(subcommands) => {
                let mut lineage = parents.clone();
                lineage.push(name.to_string());
                let mut children = Vec::with_capacity(subcommands.len());
                for (index, subcommand) in subcommands.into_iter().enumerate() {
                    let mut child_path = path.clone();
                    child_path.push(index);
                    children.push(Self::build_at(
                        subcommand.name,
                        subcommand.command,
                        lineage.clone(),
                        child_path,
                    )?);
                }
                NodeKind::Group {
                    subcommands: children,
                }
            }
        };

        Ok(Self {
            name: name.to_string(),
            parents,
            description,
            path,
            kind,
        })
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Declared arguments; empty for a group.
    pub fn arguments(&self) -> &[ArgumentSpec] {
        match &self.kind {
            NodeKind::Leaf { arguments } => arguments,
            NodeKind::Group { .. } => &[],
        }
    }

    /// Child nodes in declaration order; empty for a leaf.
    pub fn children(&self) -> &[CommandNode] {
        match &self.kind {
            NodeKind::Group { subcommands } => subcommands,
            NodeKind::Leaf { .. } => &[],
        }
    }

    pub fn subcommand(&self, name: &str) -> Option<&CommandNode> {
        self.children().iter().find(|child| child.name == name)
    }

    /// Follows a chain of subcommand names.
    ///
    /// # Errors
    ///
    /// [`NoSuchSubcommand`](CommandLineError::NoSuchSubcommand) naming the
    /// first name that does not match.
    pub fn descendant(&self, names: &[&str]) -> Result<&CommandNode> {
        names.iter().try_fold(self, |node, name| {
            node.subcommand(name)
                .ok_or_else(|| CommandLineError::NoSuchSubcommand(name.to_string()))
        })
    }

    pub fn flags(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments().iter().filter(|spec| spec.is_flag())
    }

    pub fn options(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments().iter().filter(|spec| spec.is_option())
    }

    pub fn inputs(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments()
            .iter()
            .filter(|spec| spec.input_kind().is_some())
    }

    pub fn find_flag(&self, token: &str) -> Option<&ArgumentSpec> {
        self.flags().find(|spec| spec.matches_token(token))
    }

    pub fn find_option(&self, token: &str) -> Option<&ArgumentSpec> {
        self.options().find(|spec| spec.matches_token(token))
    }

    pub fn sorted_flags(&self) -> Vec<&ArgumentSpec> {
        sorted_by_name(self.flags())
    }

    pub fn sorted_options(&self) -> Vec<&ArgumentSpec> {
        sorted_by_name(self.options())
    }

    pub fn sorted_inputs(&self) -> Vec<&ArgumentSpec> {
        sorted_by_name(self.inputs())
    }

    /// Parent chain and own name, space separated (`bot branch list`).
    pub fn command_line(&self) -> String {
        let mut words: Vec<&str> = self.parents.iter().map(String::as_str).collect();
        words.push(&self.name);
        words.join(" ")
    }

    /// Help text rendered with the default formatter.
    pub fn usage(&self) -> String {
        UsageFormatter::default().format(self)
    }
}

fn sorted_by_name<'n>(specs: impl Iterator<Item = &'n ArgumentSpec>) -> Vec<&'n ArgumentSpec> {
    let mut specs: Vec<_> = specs.collect();
    specs.sort_by(|a, b| a.name.cmp(&b.name));
    specs
}
