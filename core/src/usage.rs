//! Help text rendering.
//!
//! ```text
//! OVERVIEW: Runs the mainframe
//!
//! USAGE: tool mainframe [options]
//!
//! FLAGS:
//!   -h, --help              Displays help text.
//!
//! OPTIONS:
//!   -p, --port <value>      Listening port. Defaults to "4040".
//! ```

use std::fmt::Write;

use crate::argument::InputKind;
use crate::node::{ArgumentSpec, CommandNode};

const HELP_DESCRIPTION: &str = "Displays help text.";

/// Renders a [`CommandNode`] as help text.
///
/// `columns` is the width of the name column; a longer name pushes its
/// description to the next line at the same indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageFormatter {
    pub columns: usize,
}

impl Default for UsageFormatter {
    fn default() -> Self {
        Self { columns: 26 }
    }
}

impl UsageFormatter {
    pub fn with_columns(columns: usize) -> Self {
        Self { columns }
    }

    pub fn format(&self, node: &CommandNode) -> String {
        let sections = [
            Some(format!("OVERVIEW: {}\n", node.description)),
            Some(self.command_line(node)),
            self.subcommands(node),
            self.flags(node),
            self.options(node),
            self.inputs(node),
        ];

        sections
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    fn command_line(&self, node: &CommandNode) -> String {
        let mut text = format!("USAGE: {}", node.command_line());
        if node.is_group() {
            text.push_str(" [subcommand [arguments]]");
        } else {
            if node.flags().next().is_some() {
                text.push_str(" [flags]");
            }
            if node.options().next().is_some() {
                text.push_str(" [options]");
            }
            if node.inputs().next().is_some() {
                text.push_str(" <inputs>");
            }
        }
        text.push('\n');
        text
    }

    fn subcommands(&self, node: &CommandNode) -> Option<String> {
        if node.children().is_empty() {
            return None;
        }

        let mut text = String::from("SUBCOMMANDS:\n");
        for child in node.children() {
            self.push_row(&mut text, format!("  {}", child.name), &child.description);
        }
        Some(text)
    }

    fn flags(&self, node: &CommandNode) -> Option<String> {
        if node.is_group() {
            return None;
        }

        let mut rows: Vec<(&str, Option<char>, &str)> = node
            .flags()
            .map(|spec| (spec.name.as_str(), spec.short, spec.description.as_str()))
            .collect();
        rows.push(("help", Some('h'), HELP_DESCRIPTION));
        rows.sort_by(|a, b| a.0.cmp(b.0));

        let mut text = String::from("FLAGS:\n");
        for (name, short, description) in rows {
            self.push_row(&mut text, format!("  {}--{name}", short_prefix(short)), description);
        }
        Some(text)
    }

    fn options(&self, node: &CommandNode) -> Option<String> {
        let options = node.sorted_options();
        if options.is_empty() {
            return None;
        }

        let mut text = String::from("OPTIONS:\n");
        for spec in options {
            let label = format!(
                "  {}--{} <{}>",
                short_prefix(spec.short),
                spec.name,
                spec.value_name.as_deref().unwrap_or("value")
            );
            let description = format!(
                "{} Defaults to \"{}\".",
                spec.description,
                spec.default_value.as_deref().unwrap_or_default()
            );
            self.push_row(&mut text, label, &description);
        }
        Some(text)
    }

    fn inputs(&self, node: &CommandNode) -> Option<String> {
        let inputs = node.sorted_inputs();
        if inputs.is_empty() {
            return None;
        }

        let mut text = String::from("INPUTS:\n");
        for spec in inputs {
            self.push_row(&mut text, format!("  {}", spec.name), &input_description(spec));
        }
        Some(text)
    }

    fn push_row(&self, text: &mut String, label: String, description: &str) {
        let width = label.chars().count();
        text.push_str(&label);
        if width + 1 > self.columns {
            text.push('\n');
            text.push_str(&" ".repeat(self.columns));
        } else {
            text.push_str(&" ".repeat(self.columns - width));
        }
        let _ = writeln!(text, "{description}");
    }
}

fn short_prefix(short: Option<char>) -> String {
    short.map(|c| format!("-{c}, ")).unwrap_or_default()
}

fn input_description(spec: &ArgumentSpec) -> String {
    match spec.input_kind() {
        Some(InputKind::Optional) => format!("{} (OPTIONAL)", spec.description),
        _ => spec.description.clone(),
    }
}
