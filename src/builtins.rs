use crate::error::{report, Error, Result};
use crate::LoopStatus;
use log::debug;
use std::env;
use nix::unistd::chdir;
use std::ffi::OsString;
use std::io::Write;

/// Commands executed inside the interpreter's own process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Cd,
}

/// The default registry, in lookup order.
pub const BUILTINS: [Builtin; 2] = [Builtin::Exit, Builtin::Cd];

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Cd => "cd",
        }
    }

    /// First entry of `registry` whose name is exactly `name`.
    pub fn lookup(registry: &[Builtin], name: &str) -> Option<Builtin> {
        registry.iter().copied().find(|builtin| builtin.name() == name)
    }

    /// Runs the builtin. `argv[0]` is the command name.
    pub fn run(self, argv: &[&str], out: &mut dyn Write, err: &mut dyn Write) -> LoopStatus {
        match self {
            Builtin::Exit => exit(argv, out),
            Builtin::Cd => {
                if let Err(error) = cd(argv) {
                    report(err, &error);
                }
                LoopStatus::Continue
            }
        }
    }
}

// Echoes argv[0] rather than honoring an exit code; `exit 2` still exits 0.
fn exit(argv: &[&str], out: &mut dyn Write) -> LoopStatus {
    if let Some(name) = argv.first() {
        let _ = writeln!(out, "{}", name).and_then(|_| out.flush());
    }
    LoopStatus::Terminate
}

fn cd(argv: &[&str]) -> Result<()> {
    let target = match argv.get(1) {
        Some(path) => OsString::from(*path),
        None => env::var_os("HOME").ok_or(Error::HomeNotSet)?,
    };

    debug!("cd: {:?}", target);

    chdir(target.as_os_str()).map_err(|source| Error::ChangeDir {
        path: target.to_string_lossy().into_owned(),
        source,
    })
}
