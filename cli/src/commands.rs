//! The demo command tree.

use std::collections::BTreeMap;
use std::path::PathBuf;

use cmdline_core::{
    Command, CommandNode, Declaration, Flag, OptionalInput, RequiredInput, RunResult, Uri,
    ValueOption, VariadicInput, arguments, subcommands,
};
use cmdline_parser::CommandLineParser;
use tracing::debug;

/// Name the tree is described under.
pub const APP_NAME: &str = "cmdline-demo";

pub struct App {
    math: MathCommand,
    bot: BotCommand,
    server: ServerCommand,
    describe: DescribeCommand,
}

impl App {
    pub fn new() -> Self {
        Self {
            math: MathCommand::new(),
            bot: BotCommand::new(),
            server: ServerCommand::new(),
            describe: DescribeCommand::new(),
        }
    }

    /// Resolves and validates the whole tree once, handing the result to
    /// `describe`.
    pub fn prepare(&mut self, parser: &CommandLineParser) -> cmdline_core::Result<()> {
        let root = parser.describe(self, APP_NAME)?;
        self.describe.snapshot = Some(root);
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for App {
    fn description(&self) -> &str {
        "Demonstrates declarative command-line parsing"
    }

    fn declare(&mut self) -> Declaration<'_> {
        subcommands!(self; math, bot, server, describe)
    }
}

// ---------------------------------------------------------------------------
// math
// ---------------------------------------------------------------------------

struct MathCommand {
    fibonacci: FibonacciCommand,
    factorize: FactorizeCommand,
    sumoftwo: SumOfTwoCommand,
    sum: SumCommand,
}

impl MathCommand {
    fn new() -> Self {
        Self {
            fibonacci: FibonacciCommand {
                verbose: Flag::new("Prints every step").with_short('v'),
                iterations: ValueOption::new(5, "Number of iterations to perform.")
                    .with_short('i')
                    .with_pattern(r"^\d+$"),
            },
            factorize: FactorizeCommand {
                verbose: Flag::new("Prints the number being factorized").with_short('v'),
                number: OptionalInput::new("Number to factorize"),
            },
            sumoftwo: SumOfTwoCommand {
                number_a: RequiredInput::new("First number"),
                number_b: OptionalInput::new("Second number"),
            },
            sum: SumCommand {
                first_number: RequiredInput::new("First number"),
                numbers: VariadicInput::new("More numbers"),
            },
        }
    }
}

impl Command for MathCommand {
    fn description(&self) -> &str {
        "Perform math operations"
    }

    fn declare(&mut self) -> Declaration<'_> {
        subcommands!(self; fibonacci, factorize, sumoftwo, sum)
    }
}

struct FibonacciCommand {
    verbose: Flag,
    iterations: ValueOption<u32>,
}

impl Command for FibonacciCommand {
    fn description(&self) -> &str {
        "Calculate fibonacci numbers"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; verbose, iterations)
    }

    fn run(&mut self) -> RunResult {
        let (mut previous, mut current) = (0u64, 1u64);
        for step in 0..*self.iterations.value() {
            let next = previous.checked_add(current).ok_or("fibonacci overflowed u64")?;
            previous = current;
            current = next;
            if self.verbose.is_set() {
                println!("{}: {current}", step + 1);
            }
        }
        println!("{current}");
        Ok(())
    }
}

struct FactorizeCommand {
    verbose: Flag,
    number: OptionalInput<u64>,
}

impl Command for FactorizeCommand {
    fn description(&self) -> &str {
        "Factorize a number"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; verbose, number)
    }

    fn run(&mut self) -> RunResult {
        let Some(&number) = self.number.value() else {
            return Err("no number to factorize".into());
        };
        if self.verbose.is_set() {
            println!("factorizing {number}");
        }
        let factors: Vec<String> = prime_factors(number).iter().map(u64::to_string).collect();
        println!("{}", factors.join(" "));
        Ok(())
    }
}

pub fn prime_factors(mut number: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut divisor = 2;
    while divisor <= number / divisor {
        while number % divisor == 0 {
            factors.push(divisor);
            number /= divisor;
        }
        divisor += 1;
    }
    if number > 1 {
        factors.push(number);
    }
    factors
}

struct SumOfTwoCommand {
    number_a: RequiredInput<i64>,
    number_b: OptionalInput<i64>,
}

impl Command for SumOfTwoCommand {
    fn description(&self) -> &str {
        "Sum two numbers"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; number_a, number_b)
    }

    fn run(&mut self) -> RunResult {
        let a = self.number_a.value().copied().ok_or("number_a is unbound")?;
        let b = self.number_b.value().copied().unwrap_or(0);
        let total = a.checked_add(b).ok_or("sum overflowed i64")?;
        println!("{total}");
        Ok(())
    }
}

struct SumCommand {
    first_number: RequiredInput<i64>,
    numbers: VariadicInput<i64>,
}

impl Command for SumCommand {
    fn description(&self) -> &str {
        "Sum arbitrary amount of numbers"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; first_number, numbers)
    }

    fn run(&mut self) -> RunResult {
        let first = self.first_number.value().copied().ok_or("first_number is unbound")?;
        let total = self
            .numbers
            .values()
            .iter()
            .try_fold(first, |total, &number| total.checked_add(number))
            .ok_or("sum overflowed i64")?;
        println!("{total}");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// bot
// ---------------------------------------------------------------------------

struct BotCommand {
    build: BuildCommand,
    branch: BranchCommand,
}

impl BotCommand {
    fn new() -> Self {
        Self {
            build: BuildCommand {
                branch: RequiredInput::new("Branch to build"),
                env: ValueOption::new(BTreeMap::new(), "Build environment.")
                    .with_short('e')
                    .with_value_name("key=value,..."),
            },
            branch: BranchCommand {
                list: ListBranchesCommand {
                    remote: Flag::new("Lists remote branches").with_short('r'),
                },
            },
        }
    }
}

impl Command for BotCommand {
    fn description(&self) -> &str {
        "BuildBot commands"
    }

    fn declare(&mut self) -> Declaration<'_> {
        subcommands!(self; build, branch)
    }
}

struct BuildCommand {
    branch: RequiredInput<String>,
    env: ValueOption<BTreeMap<String, String>>,
}

impl Command for BuildCommand {
    fn description(&self) -> &str {
        "Request a build"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; branch, env)
    }

    fn run(&mut self) -> RunResult {
        let branch = self.branch.value().ok_or("branch is unbound")?;
        println!("requested build of {branch}");
        for (key, value) in self.env.value() {
            println!("  {key}={value}");
        }
        Ok(())
    }
}

struct BranchCommand {
    list: ListBranchesCommand,
}

impl Command for BranchCommand {
    fn description(&self) -> &str {
        "Branch commands"
    }

    fn declare(&mut self) -> Declaration<'_> {
        subcommands!(self; list)
    }
}

struct ListBranchesCommand {
    remote: Flag,
}

impl Command for ListBranchesCommand {
    fn description(&self) -> &str {
        "List branches"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; remote)
    }

    fn run(&mut self) -> RunResult {
        let branches: &[&str] = if self.remote.is_set() {
            &["origin/main", "origin/release"]
        } else {
            &["main", "release"]
        };
        for branch in branches {
            println!("{branch}");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// server
// ---------------------------------------------------------------------------

struct ServerCommand {
    port: ValueOption<u16>,
    weights: ValueOption<Vec<i32>>,
    root: ValueOption<PathBuf>,
    upstream: OptionalInput<Uri>,
}

impl ServerCommand {
    fn new() -> Self {
        Self {
            port: ValueOption::new(4040, "Listening port.")
                .with_short('p')
                .with_pattern(r"^\d+$"),
            weights: ValueOption::new(Vec::new(), "Load balancing weights.").with_short('w'),
            root: ValueOption::new(PathBuf::from("."), "Document root.").with_value_name("path"),
            upstream: OptionalInput::new("Upstream to proxy to"),
        }
    }
}

impl Command for ServerCommand {
    fn description(&self) -> &str {
        "Starts the server."
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; port, weights, root, upstream)
    }

    fn run(&mut self) -> RunResult {
        println!(
            "serving {} on port {}",
            self.root.value().display(),
            self.port.value()
        );
        if !self.weights.value().is_empty() {
            println!("weights {:?}", self.weights.value());
        }
        if let Some(upstream) = self.upstream.value() {
            println!("proxying to {upstream}");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

struct DescribeCommand {
    format: ValueOption<String>,
    path: VariadicInput<String>,
    snapshot: Option<CommandNode>,
}

impl DescribeCommand {
    fn new() -> Self {
        Self {
            format: ValueOption::new("json".to_string(), "Output format, json or yaml.")
                .with_short('f')
                .with_pattern(r"^(json|yaml)$"),
            path: VariadicInput::new("Subcommand path to describe"),
            snapshot: None,
        }
    }
}

impl Command for DescribeCommand {
    fn description(&self) -> &str {
        "Prints the resolved command tree"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; format, path)
    }

    fn run(&mut self) -> RunResult {
        let root = self.snapshot.as_ref().ok_or("command tree was not prepared")?;
        let path: Vec<&str> = self.path.values().iter().map(String::as_str).collect();
        let node = root.descendant(&path)?;
        debug!(command = %node.command_line(), format = %self.format.value(), "Describing");

        let rendered = match self.format.value().as_str() {
            "yaml" => serde_yaml::to_string(node)?,
            _ => serde_json::to_string_pretty(node)?,
        };
        println!("{}", rendered.trim_end());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_factors() {
        assert_eq!(prime_factors(1), Vec::<u64>::new());
        assert_eq!(prime_factors(13), vec![13]);
        assert_eq!(prime_factors(360), vec![2, 2, 2, 3, 3, 5]);
    }

    #[test]
    fn test_tree_is_valid() {
        let mut app = App::new();
        app.prepare(&CommandLineParser::new()).unwrap();
        let root = app.describe.snapshot.as_ref().unwrap();

        let names: Vec<_> = root.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["math", "bot", "server", "describe"]);
        assert_eq!(
            root.descendant(&["bot", "branch", "list"]).unwrap().command_line(),
            "cmdline-demo bot branch list"
        );
    }

    #[test]
    fn test_parse_binds_into_app() {
        let mut app = App::new();
        CommandLineParser::new()
            .parse_arguments(
                &["cmdline-demo", "bot", "build", "-e", "CI=1,MODE=fast", "main"],
                &mut app,
                APP_NAME,
            )
            .unwrap();

        assert_eq!(app.bot.build.branch.value().map(String::as_str), Some("main"));
        assert_eq!(app.bot.build.env.value().get("MODE").map(String::as_str), Some("fast"));
    }

    #[test]
    fn test_describe_requires_snapshot() {
        let mut describe = DescribeCommand::new();
        assert!(describe.run().is_err());
    }
}
