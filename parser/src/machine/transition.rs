//! The transition table.
//!
//! [`transition`] is a pure function of the current state, the event and the
//! context. It returns the next state together with the binding work that
//! entering that state requires; the driver performs that work afterwards.

use cmdline_core::{ArgumentSpec, CommandLineError, CommandNode};

use super::context::ParserContext;
use super::event::ParserEvent;
use super::state::ParserState;

/// Work to perform on entry to a new state.
#[derive(Debug, Clone)]
pub enum SideEffect<'t> {
    /// Make the node current and reset the expected inputs.
    EnterSubcommand(&'t CommandNode),
    /// Set the flag to `true`.
    BindFlag(&'t ArgumentSpec),
    /// Check the pattern, convert and store the raw value.
    BindValue(&'t ArgumentSpec, String),
}

#[derive(Debug, Clone)]
pub struct Transition<'t> {
    pub state: ParserState<'t>,
    pub effect: Option<SideEffect<'t>>,
}

/// Computes the state reached from `state` on `event`.
///
/// `argument` is the token that produced the event, if any; it is what
/// `InvalidFlagOrOption` and `UnexpectedArgument` report.
pub fn transition<'t>(
    state: &ParserState<'t>,
    event: ParserEvent<'t>,
    argument: Option<&str>,
    context: &ParserContext<'t>,
) -> Transition<'t> {
    let next = next_state(state, event, argument, context);
    let effect = match &next {
        ParserState::ParsedSubcommand(node) => Some(SideEffect::EnterSubcommand(*node)),
        ParserState::ParsedFlag(flag) => Some(SideEffect::BindFlag(*flag)),
        ParserState::ParsedOptionValue(spec, value) | ParserState::ParsedInput(spec, value) => {
            Some(SideEffect::BindValue(*spec, value.clone()))
        }
        _ => None,
    };
    Transition {
        state: next,
        effect,
    }
}

fn next_state<'t>(
    state: &ParserState<'t>,
    event: ParserEvent<'t>,
    argument: Option<&str>,
    context: &ParserContext<'t>,
) -> ParserState<'t> {
    use ParserEvent as E;
    use ParserState as S;

    if let E::ErrorWasThrown(error) = event {
        return S::Failure(error);
    }

    match state {
        S::Command | S::ParsedSubcommand(_) => match event {
            E::ScannedSubcommand(node) => S::ParsedSubcommand(node),
            event => after_argument(event, argument, context),
        },
        S::ParsedFlag(_) | S::ParsedOptionValue(..) => match event {
            E::ScannedSubcommand(_) => unexpected(argument),
            event => after_argument(event, argument, context),
        },
        S::ParsedOption(option) => match event {
            E::ScannedOptionValue(option, value) => S::ParsedOptionValue(option, value),
            _ => S::Failure(CommandLineError::MissingOptionValue(option.name.clone())),
        },
        S::ParsedInput(..) => match event {
            E::ScannedInput(input, value) => S::ParsedInput(input, value),
            E::NoMoreArguments => exit_state(context),
            _ => unexpected(argument),
        },
        S::Failure(_) | S::Success(_) => S::Failure(CommandLineError::UnexpectedError),
    }
}

/// Shared rows for every state that accepts flags, options and inputs.
fn after_argument<'t>(
    event: ParserEvent<'t>,
    argument: Option<&str>,
    context: &ParserContext<'t>,
) -> ParserState<'t> {
    match event {
        ParserEvent::ScannedFlag(flag) => ParserState::ParsedFlag(flag),
        ParserEvent::ScannedOption(option) => ParserState::ParsedOption(option),
        ParserEvent::ScannedInput(input, value) => ParserState::ParsedInput(input, value),
        ParserEvent::ScannedInvalidFlagOrOption => ParserState::Failure(
            argument.map_or(CommandLineError::UnexpectedError, |token| {
                CommandLineError::InvalidFlagOrOption(token.to_string())
            }),
        ),
        ParserEvent::ScannedHelpFlag(node) => {
            ParserState::Failure(CommandLineError::UsageRequested(Box::new(node.clone())))
        }
        ParserEvent::NoMoreArguments => exit_state(context),
        _ => unexpected(argument),
    }
}

fn unexpected<'t>(argument: Option<&str>) -> ParserState<'t> {
    ParserState::Failure(argument.map_or(CommandLineError::UnexpectedError, |token| {
        CommandLineError::UnexpectedArgument(token.to_string())
    }))
}

fn exit_state<'t>(context: &ParserContext<'t>) -> ParserState<'t> {
    match context.missing_required_input() {
        Some(input) => ParserState::Failure(CommandLineError::MissingInputArgument(input.name.clone())),
        None => ParserState::Success(context.current()),
    }
}
