use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::launcher::{ForkExecLauncher, Launcher};
use crate::repl::LineSource;
use crate::tokenizer::tokenize;
use crate::LoopStatus;
use log::debug;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// The read-eval loop: one line in, one command run to completion, repeat.
pub struct Shell<S, L = ForkExecLauncher> {
    source: S,
    dispatcher: Dispatcher<L>,
    state: State,
}

impl<S: LineSource> Shell<S> {
    pub fn new(source: S) -> Self {
        Self::with_dispatcher(source, Dispatcher::default())
    }
}

impl<S: LineSource, L: Launcher> Shell<S, L> {
    pub fn with_dispatcher(source: S, dispatcher: Dispatcher<L>) -> Self {
        Self {
            source,
            dispatcher,
            state: State::Running,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Runs until end of input or a builtin asks to terminate.
    ///
    /// Only a failure of the line source itself is returned as an error; the
    /// loop is halted in that case too.
    pub fn run(&mut self, out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        while self.state == State::Running {
            let line = match self.source.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("end of input");
                    self.state = State::Halted;
                    break;
                }
                Err(error) => {
                    self.state = State::Halted;
                    return Err(error);
                }
            };

            let argv = tokenize(&line);
            if self.dispatcher.dispatch(&argv, out, err) == LoopStatus::Terminate {
                debug!("terminated by {:?}", argv.first());
                self.state = State::Halted;
            }
        }

        Ok(())
    }
}
