use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(version, about = "A minimal interactive command interpreter")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read commands from standard input (the default)
    Repl {
        /// Use the interactive line editor with history
        #[arg(long)]
        editor: bool,

        /// Do not print a prompt before each line
        #[arg(long, conflicts_with = "editor")]
        no_prompt: bool,
    },

    /// Run each line of a file as a command
    Run {
        /// Path to the command file
        file: PathBuf,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Repl {
            editor: false,
            no_prompt: false,
        }
    }
}
