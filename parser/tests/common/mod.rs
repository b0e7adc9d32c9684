#![allow(dead_code)]

use cmdline_core::{
    Command, Declaration, Flag, OptionalInput, RequiredInput, RunResult, ValueOption,
    VariadicInput, arguments, subcommands,
};

pub fn fibonacci(n: u64) -> u64 {
    let (mut f1, mut f2) = (0u64, 1u64);
    for _ in 0..n {
        let f = f1 + f2;
        f1 = f2;
        f2 = f;
    }
    f2
}

pub struct FibonacciCommand {
    pub verbose: Flag,
    pub iterations: ValueOption<u64>,
    pub result: Option<u64>,
}

impl FibonacciCommand {
    pub fn new() -> Self {
        Self {
            verbose: Flag::new("Prints verbose output").with_short('v'),
            iterations: ValueOption::new(5, "Number of iterations to perform.")
                .with_short('i')
                .with_pattern(r"^\d+$"),
            result: None,
        }
    }
}

impl Command for FibonacciCommand {
    fn description(&self) -> &str {
        "Calculate fibonacci numbers"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; verbose, iterations)
    }

    fn run(&mut self) -> RunResult {
        self.result = Some(fibonacci(*self.iterations.value()));
        Ok(())
    }
}

pub struct FactorizeCommand {
    pub verbose: Flag,
    pub number: OptionalInput<i64>,
}

impl Command for FactorizeCommand {
    fn description(&self) -> &str {
        "Factorize a number"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; verbose, number)
    }
}

pub struct SumOfTwoCommand {
    pub number_a: RequiredInput<i64>,
    pub number_b: OptionalInput<i64>,
    pub result: Option<i64>,
}

impl Command for SumOfTwoCommand {
    fn description(&self) -> &str {
        "Sum two numbers"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; number_a, number_b)
    }

    fn run(&mut self) -> RunResult {
        let a = self.number_a.value().ok_or("number_a is unbound")?;
        self.result = Some(a + self.number_b.value().copied().unwrap_or(0));
        Ok(())
    }
}

pub struct SumCommand {
    pub first_number: RequiredInput<i64>,
    pub numbers: VariadicInput<i64>,
    pub result: Option<i64>,
}

impl Command for SumCommand {
    fn description(&self) -> &str {
        "Sum arbitrary amount of numbers"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; first_number, numbers)
    }

    fn run(&mut self) -> RunResult {
        let first = self.first_number.value().ok_or("first_number is unbound")?;
        self.result = Some(first + self.numbers.values().iter().sum::<i64>());
        Ok(())
    }
}

pub struct MathCommand {
    pub fibonacci: FibonacciCommand,
    pub factorize: FactorizeCommand,
    pub sumoftwo: SumOfTwoCommand,
    pub sum: SumCommand,
}

impl MathCommand {
    pub fn new() -> Self {
        Self {
            fibonacci: FibonacciCommand::new(),
            factorize: FactorizeCommand {
                verbose: Flag::new("Prints verbose output").with_short('v'),
                number: OptionalInput::new("Number to factorize"),
            },
            sumoftwo: SumOfTwoCommand {
                number_a: RequiredInput::new("First number"),
                number_b: OptionalInput::new("Second number"),
                result: None,
            },
            sum: SumCommand {
                first_number: RequiredInput::new("First number"),
                numbers: VariadicInput::new("More numbers"),
                result: None,
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

pub struct BuildCommand {
    pub branch: RequiredInput<String>,
}

impl Command for BuildCommand {
    fn description(&self) -> &str {
        "Request a build"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; branch)
    }
}

pub struct ListBranchesCommand {
    pub listed: bool,
}

impl Command for ListBranchesCommand {
    fn description(&self) -> &str {
        "List branches"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self;)
    }

    fn run(&mut self) -> RunResult {
        self.listed = true;
        Ok(())
    }
}

pub struct BranchCommand {
    pub list: ListBranchesCommand,
}

impl Command for BranchCommand {
    fn description(&self) -> &str {
        "Branch commands"
    }

    fn declare(&mut self) -> Declaration<'_> {
        subcommands!(self; list)
    }
}

pub struct BotCommand {
    pub build: BuildCommand,
    pub branch: BranchCommand,
}

impl BotCommand {
    pub fn new() -> Self {
        Self {
            build: BuildCommand {
                branch: RequiredInput::new("branch"),
            },
            branch: BranchCommand {
                list: ListBranchesCommand { listed: false },
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

pub struct MainframeCommand {
    pub port: ValueOption<u16>,
    pub weights: ValueOption<Vec<i32>>,
}

impl MainframeCommand {
    pub fn new() -> Self {
        Self {
            port: ValueOption::new(4040, "Listening port.")
                .with_short('p')
                .with_pattern(r"^\d+$"),
            weights: ValueOption::new(Vec::new(), "Load weights.").with_short('w'),
        }
    }
}

impl Command for MainframeCommand {
    fn description(&self) -> &str {
        "Starts the server."
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; port, weights)
    }
}

/// One required integer input and a `-v` flag.
pub struct CountCommand {
    pub verbose: Flag,
    pub count: RequiredInput<i64>,
}

impl CountCommand {
    pub fn new() -> Self {
        Self {
            verbose: Flag::new("Verbose output").with_short('v'),
            count: RequiredInput::new("Count"),
        }
    }
}

impl Command for CountCommand {
    fn description(&self) -> &str {
        "Counts"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; verbose, count)
    }
}

/// A required input declared after an optional one.
pub struct MisorderedCommand {
    pub first: OptionalInput<String>,
    pub second: RequiredInput<String>,
}

impl MisorderedCommand {
    pub fn new() -> Self {
        Self {
            first: OptionalInput::new("First"),
            second: RequiredInput::new("Second"),
        }
    }
}

impl Command for MisorderedCommand {
    fn description(&self) -> &str {
        "Misordered inputs"
    }

    fn declare(&mut self) -> Declaration<'_> {
        arguments!(self; first, second)
    }
}
