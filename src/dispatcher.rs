use crate::builtins::{Builtin, BUILTINS};
use crate::launcher::{ForkExecLauncher, Launcher};
use crate::LoopStatus;
use log::debug;
use std::io::Write;

/// Routes a tokenized command to a builtin or to the launcher.
pub struct Dispatcher<L = ForkExecLauncher> {
    builtins: &'static [Builtin],
    launcher: L,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(&BUILTINS, ForkExecLauncher)
    }
}

impl<L: Launcher> Dispatcher<L> {
    pub fn new(builtins: &'static [Builtin], launcher: L) -> Self {
        Self { builtins, launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn dispatch(&self, argv: &[&str], out: &mut dyn Write, err: &mut dyn Write) -> LoopStatus {
        let Some(&name) = argv.first() else {
            return LoopStatus::Continue;
        };

        match Builtin::lookup(self.builtins, name) {
            Some(builtin) => {
                debug!("builtin: {:?}", builtin);
                builtin.run(argv, out, err)
            }
            None => {
                debug!("external: {}", name);
                self.launcher.launch(argv, err)
            }
        }
    }
}
