//! Token-by-token command-line parsing.
//!
//! This crate binds a flat list of command-line tokens to a command declared
//! with [`cmdline_core`]. Parsing is a finite-state machine:
//!
//! - [`classify`](classify::classify) turns each token into a
//!   [`ParserEvent`] (subcommand, flag, option, option value, positional
//!   input, help request, or an invalid/unexpected token).
//! - [`transition`] maps the current [`ParserState`] and the event to the
//!   next state plus the binding [`SideEffect`] of entering it.
//! - [`ParserStateMachine`] drives the loop and performs the bindings; a
//!   binding failure is fed back as an event, so every run terminates in
//!   success or one [`CommandLineError`](cmdline_core::CommandLineError).
//!
//! Most callers only need [`CommandLineParser`].
//!
//! # Example
//!
//! ```
//! use cmdline_core::*;
//! use cmdline_parser::CommandLineParser;
//!
//! struct Fibonacci {
//!     verbose: Flag,
//!     iterations: ValueOption<u32>,
//!     count: RequiredInput<u64>,
//! }
//!
//! impl Command for Fibonacci {
//!     fn description(&self) -> &str {
//!         "Prints Fibonacci numbers"
//!     }
//!
//!     fn declare(&mut self) -> Declaration<'_> {
//!         arguments!(self; verbose, iterations, count)
//!     }
//! }
//!
//! let mut fibonacci = Fibonacci {
//!     verbose: Flag::new("Verbose output").with_short('v'),
//!     iterations: ValueOption::new(5, "Iterations").with_short('i').with_pattern(r"^\d+$"),
//!     count: RequiredInput::new("How many numbers"),
//! };
//!
//! let parser = CommandLineParser::new();
//! parser
//!     .parse_arguments(&["fibonacci", "-v", "10"], &mut fibonacci, "fibonacci")
//!     .unwrap();
//! assert!(fibonacci.verbose.is_set());
//! assert_eq!(fibonacci.count.value(), Some(&10));
//! assert_eq!(*fibonacci.iterations.value(), 5);
//!
//! let err = parser
//!     .parse_arguments(&["fibonacci", "--help"], &mut fibonacci, "fibonacci")
//!     .err()
//!     .unwrap();
//! assert!(err.is_usage_request());
//! assert!(err.to_string().starts_with("OVERVIEW: Prints Fibonacci numbers"));
//! ```

pub mod classify;
mod command_line;
pub mod machine;

pub use command_line::{CommandLineParser, ParsedCommand};
pub use machine::{
    ParserContext, ParserEvent, ParserState, ParserStateMachine, SideEffect, Transition,
    transition,
};
