//! The parser state machine.
//!
//! The machine reads tokens strictly in order. For each one it classifies the
//! token into a [`ParserEvent`], asks [`transition`] for the next state and
//! the [`SideEffect`] of entering it, then performs that effect against the
//! live command. A failed binding is fed back as
//! [`ParserEvent::ErrorWasThrown`], so every run ends in
//! [`ParserState::Success`] or [`ParserState::Failure`].

mod context;
mod event;
mod state;
mod transition;

use cmdline_core::{Command, CommandLineError, CommandNode, Result, bind_argument};
use tracing::debug;

pub use context::ParserContext;
pub use event::ParserEvent;
pub use state::ParserState;
pub use transition::{SideEffect, Transition, transition};

use crate::classify::classify;

/// Drives one parse over a resolved tree, binding into the live command.
///
/// `'t` is the lifetime of the resolved tree, `'c` that of the command.
pub struct ParserStateMachine<'t, 'c> {
    state: ParserState<'t>,
    context: ParserContext<'t>,
    command: &'c mut dyn Command,
}

impl<'t, 'c> ParserStateMachine<'t, 'c> {
    /// `root` must have been built from `command`.
    pub fn new(root: &'t CommandNode, command: &'c mut dyn Command) -> Self {
        Self {
            state: ParserState::Command,
            context: ParserContext::new(root),
            command,
        }
    }

    pub fn state(&self) -> &ParserState<'t> {
        &self.state
    }

    pub fn context(&self) -> &ParserContext<'t> {
        &self.context
    }

    /// Consumes `tokens` until a terminal state is reached.
    pub fn run<S: AsRef<str>>(mut self, tokens: &[S]) -> ParserState<'t> {
        let mut tokens = tokens.iter().map(AsRef::as_ref);
        while !self.state.is_terminal() {
            match tokens.next() {
                Some(token) => {
                    let event = classify(&self.state, token, &mut self.context);
                    self.fire(event, Some(token));
                }
                None => self.fire(ParserEvent::NoMoreArguments, None),
            }
        }

        debug!(
            state = self.state.name(),
            command = %self.context.current().command_line(),
            "Parse finished"
        );
        self.state
    }

    /// Applies `event` and the binding work of the state it leads to.
    pub fn fire(&mut self, event: ParserEvent<'t>, argument: Option<&str>) {
        let event_name = event.name();
        let Transition { state, effect } = transition(&self.state, event, argument, &self.context);
        debug!(
            from = self.state.name(),
            to = state.name(),
            event = event_name,
            argument,
            "Transition"
        );
        self.state = state;

        if let Some(effect) = effect {
            if let Err(error) = self.apply(effect) {
                debug!(error = %error, "Binding failed");
                self.fire(ParserEvent::ErrorWasThrown(error), argument);
            }
        }
    }

    fn apply(&mut self, effect: SideEffect<'t>) -> Result<()> {
        match effect {
            SideEffect::EnterSubcommand(node) => {
                self.context.enter(node);
                Ok(())
            }
            SideEffect::BindFlag(flag) => self.bind(flag.index, ""),
            SideEffect::BindValue(spec, raw) => {
                if !spec.accepts(&raw) {
                    return Err(CommandLineError::InvalidArgumentFormat(raw));
                }
                self.bind(spec.index, &raw)
            }
        }
    }

    fn bind(&mut self, index: usize, raw: &str) -> Result<()> {
        let path = &self.context.current().path;
        bind_argument(&mut *self.command, path, index, raw)
    }
}
