use clap::Parser;
use log::{debug, info};
use lsh::{
    cli::{Args, Commands},
    error::{report, Result},
    repl::{BufReadSource, EditorSource, LineSource},
    shell::Shell,
};
use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

fn run_source(source: impl LineSource) -> Result<()> {
    let mut out = io::stdout();
    let mut err = io::stderr();
    Shell::new(source).run(&mut out, &mut err)
}

fn run_file(file: PathBuf) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    run_source(BufReadSource::new(reader, io::sink()).without_prompt())
}

fn run_repl(editor: bool, no_prompt: bool) -> Result<()> {
    if editor {
        return run_source(EditorSource::new());
    }

    let source = BufReadSource::new(io::stdin().lock(), io::stdout());
    if no_prompt {
        run_source(source.without_prompt())
    } else {
        run_source(source)
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command.unwrap_or_default() {
        Commands::Repl { editor, no_prompt } => {
            info!("REPL MODE");
            debug!("editor: {}, prompt: {}", editor, !no_prompt);

            run_repl(editor, no_prompt)
        }
        Commands::Run { file } => {
            info!("FILE MODE");
            debug!("file: {:?}", file);

            run_file(file)
        }
    };

    if let Err(err) = result {
        report(&mut io::stderr(), &err);
    }
}
