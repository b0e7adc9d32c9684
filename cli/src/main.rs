mod commands;
mod logging;

use cmdline_core::CommandLineError;
use cmdline_parser::CommandLineParser;
use tracing::debug;

use commands::App;
use logging::LogConfig;

fn main() {
    logging::init(&LogConfig::default());
    std::process::exit(run());
}

fn run() -> i32 {
    let parser = CommandLineParser::new();
    let mut app = App::new();
    if let Err(err) = app.prepare(&parser) {
        return report(&err);
    }

    let parsed = match parser.parse(&mut app) {
        Ok(parsed) => parsed,
        Err(err) => return report(&err),
    };

    if parsed.is_group() {
        println!("{}", parsed.usage());
        return 0;
    }

    debug!(command = %parsed.node().command_line(), "Running command");
    match parsed.run() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

/// Prints a parse outcome: help text on stdout, anything else on stderr.
fn report(err: &CommandLineError) -> i32 {
    if err.is_usage_request() {
        println!("{err}");
    } else {
        eprintln!("error: {err}");
    }
    err.exit_code()
}
