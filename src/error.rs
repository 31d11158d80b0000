use std::io::Write;
use thiserror::Error;

pub const PROGRAM_NAME: &str = "lsh";

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),
    #[error("cd: {path}: {}", .source.desc())]
    ChangeDir { path: String, source: nix::Error },
    #[error("cd: HOME not set")]
    HomeNotSet,
    #[error("{command}: argument contains a nul byte")]
    NulByte { command: String },
    #[error("fork failed: {}", .0.desc())]
    Fork(nix::Error),
    #[error("wait failed: {}", .0.desc())]
    Wait(nix::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Writes `lsh: <error>` to the diagnostic stream.
pub fn report(err: &mut dyn Write, error: &Error) {
    // Nothing sensible to do if stderr itself is gone.
    let _ = writeln!(err, "{}: {}", PROGRAM_NAME, error);
}
