use crate::error::{report, Error, Result, PROGRAM_NAME};
use crate::LoopStatus;
use log::debug;
use nix::errno::Errno;
use nix::libc;
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{fork, write, ForkResult, Pid};
use std::ffi::CString;
use std::ptr;
use std::io::{self, Write};

/// Runs external programs on behalf of the dispatcher.
pub trait Launcher {
    /// Runs `argv` to completion. `argv[0]` names the program.
    ///
    /// `err` receives failures seen by the interpreter itself (spawn, wait).
    /// A program that cannot be executed is reported by the child directly on
    /// standard error.
    fn launch(&self, argv: &[&str], err: &mut dyn Write) -> LoopStatus;
}

/// Launches programs with fork + execvp and blocks until the child is gone.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForkExecLauncher;

impl Launcher for ForkExecLauncher {
    fn launch(&self, argv: &[&str], err: &mut dyn Write) -> LoopStatus {
        match spawn_and_wait(argv) {
            Ok(status) => debug!("{} finished: {:?}", argv[0], status),
            Err(error) => report(err, &error),
        }
        LoopStatus::Continue
    }
}

/// True once the child has exited or was killed by a signal.
/// Stop and continue notifications do not end the wait.
pub fn has_terminated(status: &WaitStatus) -> bool {
    matches!(status, WaitStatus::Exited(..) | WaitStatus::Signaled(..))
}

fn spawn_and_wait(argv: &[&str]) -> Result<WaitStatus> {
    let args = argv
        .iter()
        .map(|arg| CString::new(*arg))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::NulByte {
            command: argv[0].to_string(),
        })?;

    // Prepared up front: the child must not allocate between fork and exec.
    let mut exec_argv: Vec<*const libc::c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
    exec_argv.push(ptr::null());
    let prefix = format!("{}: {}: ", PROGRAM_NAME, argv[0]);

    // Anything still buffered would otherwise be written twice.
    io::stdout().flush()?;

    match unsafe { fork() }.map_err(Error::Fork)? {
        ForkResult::Child => {
            // The runtime ignores SIGPIPE, and an ignored signal survives exec.
            let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };

            unsafe { libc::execvp(exec_argv[0], exec_argv.as_ptr()) };
            let errno = Errno::last();

            let stderr = io::stderr();
            let _ = write(&stderr, prefix.as_bytes());
            let _ = write(&stderr, errno.desc().as_bytes());
            let _ = write(&stderr, b"\n");
            unsafe { libc::_exit(libc::EXIT_FAILURE) }
        }
        ForkResult::Parent { child } => {
            debug!("spawned {} as pid {}", argv[0], child);
            wait_for(child)
        }
    }
}

fn wait_for(child: Pid) -> Result<WaitStatus> {
    loop {
        match waitpid(child, Some(WaitPidFlag::WUNTRACED)) {
            Ok(status) if has_terminated(&status) => return Ok(status),
            Ok(status) => debug!("pid {} not finished: {:?}", child, status),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(Error::Wait(errno)),
        }
    }
}
