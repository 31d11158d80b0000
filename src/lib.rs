pub mod builtins;
pub mod cli;
pub mod dispatcher;
pub mod error;
pub mod launcher;
pub mod repl;
pub mod shell;
pub mod tokenizer;

/// Signal produced by executing one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Continue,
    Terminate,
}
