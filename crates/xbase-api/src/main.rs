//! Interactive xbase interpreter.
//!
//! Loads the snapshot, then reads commands from a script file or from the
//! terminal until QUIT or end of input.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use xbase::logging::{LogConfig, LogFormat};
use xbase::{Config, Reply, Session, SnapshotFormat};

/// Command-line arguments for the interpreter.
#[derive(Parser, Debug)]
#[command(name = "xbase", author, version, about, long_about = None)]
struct Args {
    /// Snapshot file loaded at startup and written on SAVE/QUIT
    #[arg(short, long, env = "XBASE_STATE", default_value = "database_state.json")]
    state: PathBuf,

    /// Snapshot encoding (default: from the file extension)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Log level filter (RUST_LOG overrides it)
    #[arg(long, env = "XBASE_LOG", default_value = "warn")]
    log_level: String,

    /// Also write logs to this file, rotated daily
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Multi-line log output
    #[arg(long)]
    pretty_logs: bool,

    /// Run the commands in this file instead of reading the terminal
    #[arg(long)]
    script: Option<PathBuf>,

    /// Do not save on QUIT or end of input
    #[arg(long)]
    no_save: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Binary,
}

impl From<FormatArg> for SnapshotFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => SnapshotFormat::Json,
            FormatArg::Binary => SnapshotFormat::Binary,
        }
    }
}

impl Args {
    fn config(&self) -> Config {
        let mut log = LogConfig::default().with_level(self.log_level.clone());
        if let Some(path) = &self.log_file {
            log = log.with_both(path);
        }
        if self.pretty_logs {
            log = log.with_format(LogFormat::Pretty);
        }

        let mut config = Config::new()
            .with_snapshot_path(&self.state)
            .with_autosave(!self.no_save)
            .with_log(log);
        if let Some(format) = self.format {
            config = config.with_snapshot_format(format.into());
        }
        config
    }
}

fn print(reply: &Reply) {
    for line in &reply.lines {
        println!("{}", line);
    }
}

fn run_script(session: &mut Session, path: &PathBuf) -> anyhow::Result<()> {
    let script = fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;

    for line in script.lines() {
        let reply = session.execute(line);
        print(&reply);
        if reply.quit {
            return Ok(());
        }
    }

    finish(session)
}

fn run_interactive(session: &mut Session, prompt: &str) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new().context("starting line editor")?;
    println!("Welcome to xbase. Type help or ? to list commands.\n");

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let reply = session.execute(&line);
                print(&reply);
                if reply.quit {
                    return Ok(());
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C drops the current line
                println!("^C");
            }
            Err(ReadlineError::Eof) => return finish(session),
            Err(e) => return Err(e).context("reading input"),
        }
    }
}

/// End of input behaves like QUIT, but always ends the program.
fn finish(session: &mut Session) -> anyhow::Result<()> {
    let reply = session.shutdown();
    print(&reply);
    if !reply.quit {
        bail!(
            "database state was not saved to {}",
            session.store().path().display()
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config();

    let _guard = config.log.clone().init()?;
    tracing::debug!("starting with {:?}", config);

    let mut session = Session::open(&config).with_context(|| {
        format!("loading snapshot {}", config.snapshot_path.display())
    })?;
    if session.loaded() {
        println!("Database state loaded.");
    }

    match &args.script {
        Some(path) => run_script(&mut session, path),
        None => run_interactive(&mut session, &config.prompt),
    }
}
