mod common;

use cmdline_core::{Command, CommandLineError, UsageFormatter};
use cmdline_parser::CommandLineParser;

use common::*;

fn parse_err(arguments: &[&str], command: &mut dyn Command, root: &str) -> CommandLineError {
    match CommandLineParser::new().parse_arguments(arguments, command, root) {
        Ok(parsed) => panic!("expected failure, parsed {}", parsed.node().command_line()),
        Err(err) => err,
    }
}

// ---------------------------------------------------------------------------
// Leaf commands
// ---------------------------------------------------------------------------

#[test]
fn test_flag_and_required_input() {
    let mut count = CountCommand::new();
    CommandLineParser::new()
        .parse_arguments(&["count", "-v", "10"], &mut count, "count")
        .expect("flag and input should parse");

    assert!(count.verbose.is_set());
    assert_eq!(count.count.value(), Some(&10));
}

#[test]
fn test_missing_required_input() {
    let mut count = CountCommand::new();
    let err = parse_err(&["count"], &mut count, "count");
    assert!(matches!(err, CommandLineError::MissingInputArgument(ref name) if name == "count"));
    assert_eq!(err.to_string(), "missing value for input argument \"count\"");
}

#[test]
fn test_fibonacci_runs_with_bound_option() {
    let mut fibonacci = FibonacciCommand::new();
    let parsed = CommandLineParser::new()
        .parse_arguments(&["fibonacci", "-v", "-i", "10"], &mut fibonacci, "fibonacci")
        .unwrap();
    assert_eq!(parsed.node().name, "fibonacci");
    parsed.run().unwrap();

    assert!(fibonacci.verbose.is_set());
    assert_eq!(*fibonacci.iterations.value(), 10);
    assert_eq!(fibonacci.result, Some(common::fibonacci(10)));
}

#[test]
fn test_option_pattern_and_default() {
    let mut mainframe = MainframeCommand::new();
    let err = parse_err(&["mainframe", "-p", "abc"], &mut mainframe, "mainframe");
    assert!(matches!(err, CommandLineError::InvalidArgumentFormat(ref raw) if raw == "abc"));

    CommandLineParser::new()
        .parse_arguments(&["mainframe"], &mut mainframe, "mainframe")
        .unwrap();
    assert_eq!(*mainframe.port.value(), 4040);

    CommandLineParser::new()
        .parse_arguments(&["mainframe", "--port", "8080"], &mut mainframe, "mainframe")
        .unwrap();
    assert_eq!(*mainframe.port.value(), 8080);
}

#[test]
fn test_array_option() {
    let mut mainframe = MainframeCommand::new();
    CommandLineParser::new()
        .parse_arguments(&["mainframe", "-w", "1,2,3"], &mut mainframe, "mainframe")
        .unwrap();
    assert_eq!(mainframe.weights.value(), &vec![1, 2, 3]);

    let err = parse_err(&["mainframe", "-w", "1,x,3"], &mut mainframe, "mainframe");
    assert!(matches!(err, CommandLineError::InvalidArgumentFormat(ref raw) if raw == "x"));
}

#[test]
fn test_option_without_value() {
    let mut mainframe = MainframeCommand::new();
    let err = parse_err(&["mainframe", "-p"], &mut mainframe, "mainframe");
    assert!(matches!(err, CommandLineError::MissingOptionValue(ref name) if name == "port"));

    let err = parse_err(&["mainframe", "-p", "-w", "1"], &mut mainframe, "mainframe");
    assert!(matches!(err, CommandLineError::MissingOptionValue(ref name) if name == "port"));
}

#[test]
fn test_unknown_flag_is_fatal_everywhere() {
    let mut fibonacci = FibonacciCommand::new();
    for arguments in [
        &["fibonacci", "--colour"][..],
        &["fibonacci", "-v", "--colour"][..],
        &["fibonacci", "-i", "3", "-x"][..],
    ] {
        let err = parse_err(arguments, &mut fibonacci, "fibonacci");
        assert!(
            matches!(err, CommandLineError::InvalidFlagOrOption(_)),
            "unexpected {err:?} for {arguments:?}"
        );
    }
}

#[test]
fn test_extra_plain_token() {
    let mut count = CountCommand::new();
    let err = parse_err(&["count", "1", "2"], &mut count, "count");
    assert!(matches!(err, CommandLineError::UnexpectedArgument(ref token) if token == "2"));
}

#[test]
fn test_flags_after_input_are_unexpected() {
    let mut count = CountCommand::new();
    let err = parse_err(&["count", "10", "-v"], &mut count, "count");
    assert!(matches!(err, CommandLineError::UnexpectedArgument(ref token) if token == "-v"));

    let err = parse_err(&["count", "10", "--help"], &mut count, "count");
    assert!(matches!(err, CommandLineError::UnexpectedArgument(_)));
}

#[test]
fn test_help_short_circuits_missing_inputs() {
    let mut count = CountCommand::new();
    for arguments in [&["count", "-h"][..], &["count", "-v", "--help"][..]] {
        let err = parse_err(arguments, &mut count, "count");
        assert!(err.is_usage_request());
        assert_eq!(err.exit_code(), 0);
        assert!(err.to_string().contains("USAGE: count [flags] <inputs>"));
    }
}

// ---------------------------------------------------------------------------
// Command groups
// ---------------------------------------------------------------------------

#[test]
fn test_subcommand_with_required_input() {
    let mut bot = BotCommand::new();
    let parsed = CommandLineParser::new()
        .parse_arguments(&["bot", "build", "master"], &mut bot, "bot")
        .unwrap();
    assert_eq!(parsed.node().command_line(), "bot build");
    assert!(!parsed.is_group());

    assert_eq!(
        bot.build.branch.value().map(String::as_str),
        Some("master")
    );
}

#[test]
fn test_nested_group_runs_leaf() {
    let mut bot = BotCommand::new();
    CommandLineParser::new()
        .parse_arguments(&["bot", "branch", "list"], &mut bot, "bot")
        .unwrap()
        .run()
        .unwrap();
    assert!(bot.branch.list.listed);
}

#[test]
fn test_group_without_tokens_stops_at_group() {
    let mut bot = BotCommand::new();
    let parsed = CommandLineParser::new()
        .parse_arguments(&["bot", "branch"], &mut bot, "bot")
        .unwrap();
    assert!(parsed.is_group());
    assert!(parsed.usage().contains("SUBCOMMANDS:\n  list"));
}

#[test]
fn test_help_on_group() {
    let mut math = MathCommand::new();
    let err = parse_err(&["math", "--help"], &mut math, "math");
    let CommandLineError::UsageRequested(node) = err else {
        panic!("expected usage request");
    };
    assert_eq!(node.name, "math");
    assert!(node.is_group());
}

#[test]
fn test_help_on_subcommand() {
    let mut math = MathCommand::new();
    let err = parse_err(&["math", "sum", "-h"], &mut math, "math");
    let CommandLineError::UsageRequested(node) = err else {
        panic!("expected usage request");
    };
    assert_eq!(node.command_line(), "math sum");
}

#[test]
fn test_unknown_subcommand() {
    let mut math = MathCommand::new();
    let err = parse_err(&["math", "product"], &mut math, "math");
    assert!(matches!(err, CommandLineError::UnexpectedArgument(ref token) if token == "product"));
}

#[test]
fn test_math_inputs() {
    let mut math = MathCommand::new();
    let err = parse_err(&["math", "sum"], &mut math, "math");
    assert!(matches!(err, CommandLineError::MissingInputArgument(ref name) if name == "first_number"));

    let parser = CommandLineParser::new();
    parser
        .parse_arguments(&["math", "sum", "1"], &mut math, "math")
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(math.sum.result, Some(1));

    parser
        .parse_arguments(&["math", "sum", "1", "2", "3", "4"], &mut math, "math")
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(math.sum.numbers.values(), &[2, 3, 4]);
    assert_eq!(math.sum.result, Some(10));

    parser
        .parse_arguments(&["math", "sumoftwo", "1", "2"], &mut math, "math")
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(math.sumoftwo.result, Some(3));

    parser
        .parse_arguments(&["math", "factorize"], &mut math, "math")
        .unwrap();
    assert_eq!(math.factorize.number.value(), None);
}

#[test]
fn test_subcommand_cannot_follow_flag() {
    let mut math = MathCommand::new();
    let err = parse_err(&["math", "fibonacci", "-v", "sum"], &mut math, "math");
    assert!(matches!(err, CommandLineError::UnexpectedArgument(ref token) if token == "sum"));
}

#[test]
fn test_shape_errors_precede_tokens() {
    for arguments in [&["bad", "--help"][..], &["bad", "x", "y"], &["bad"]] {
        let mut bad = MisorderedCommand::new();
        let err = parse_err(arguments, &mut bad, "bad");
        assert!(
            matches!(
                err,
                CommandLineError::RequiredInputAfterOptionalInput { ref command, ref input }
                    if command == "bad" && input == "second"
            ),
            "{arguments:?} gave {err:?}"
        );
        assert!(bad.first.value().is_none());
        assert!(bad.second.value().is_none());
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

#[test]
fn test_root_mismatch_requests_usage() {
    let mut math = MathCommand::new();
    let err = parse_err(&["test"], &mut math, "math");
    let CommandLineError::UsageRequested(node) = err else {
        panic!("expected usage request");
    };
    assert_eq!(node.name, "math");
    assert!(node.usage().starts_with("OVERVIEW: Perform math operations"));
}

#[test]
fn test_executable_path_is_reduced_to_name() {
    let mut count = CountCommand::new();
    CommandLineParser::new()
        .parse_arguments(&["/usr/local/bin/count", "3"], &mut count, "count")
        .unwrap();
    assert_eq!(count.count.value(), Some(&3));
}

#[test]
fn test_empty_argument_list() {
    let mut count = CountCommand::new();
    let empty: [&str; 0] = [];
    let err = parse_err(&empty, &mut count, "count");
    assert!(matches!(err, CommandLineError::NoExecutable));
}

#[test]
fn test_reparse_is_idempotent() {
    let mut math = MathCommand::new();
    let parser = CommandLineParser::new();
    let arguments = ["math", "sum", "5", "6"];

    parser.parse_arguments(&arguments, &mut math, "math").unwrap();
    let first = math.sum.numbers.values().to_vec();
    parser.parse_arguments(&arguments, &mut math, "math").unwrap();

    assert_eq!(math.sum.numbers.values(), first.as_slice());
    assert_eq!(math.sum.first_number.value(), Some(&5));
}

#[test]
fn test_usage_for_path() {
    let mut math = MathCommand::new();
    let parser = CommandLineParser::new().with_formatter(UsageFormatter::with_columns(30));

    let usage = parser.usage(&mut math, "math", &["sumoftwo"]).unwrap();
    assert!(usage.contains("  number_b                    Second number (OPTIONAL)"));

    let err = parser.usage(&mut math, "math", &["nope"]).unwrap_err();
    assert!(matches!(err, CommandLineError::NoSuchSubcommand(ref name) if name == "nope"));
}

#[test]
fn test_describe_exposes_tree() {
    let mut bot = BotCommand::new();
    let root = CommandLineParser::new().describe(&mut bot, "bot").unwrap();
    let names: Vec<_> = root.children().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["build", "branch"]);
}
