//! envseed - run commands with variables loaded from a dotenv file.

use std::env;
use std::ffi::OsString;
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "envseed")]
#[command(about = "Run commands with variables loaded from a dotenv file")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a dotenv file and execute a command with its variables
    Run(RunArgs),
    /// Parse a dotenv file and print the resolved variables
    Print(PrintArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Dotenv file to load
    #[arg(short, long, default_value = ".env")]
    file: PathBuf,

    /// Override variables already present in the environment
    #[arg(short = 'o', long = "override")]
    override_existing: bool,

    /// Command and arguments to execute
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<OsString>,
}

#[derive(Debug, Args)]
struct PrintArgs {
    /// Dotenv file to parse
    #[arg(short, long, default_value = ".env")]
    file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Print(args) => print(args),
    }
}

/// Spawns the command with the file's variables in its environment.
/// The parent process environment is never mutated; per-variable
/// decisions are applied to the child's command builder only.
fn run(args: RunArgs) -> Result<()> {
    let vars = envseed::parse(&args.file)?;

    let (program, program_args) = args
        .command
        .split_first()
        .context("missing command to execute")?;

    let mut command = Command::new(program);
    command.args(program_args);
    for (key, value) in &vars {
        if !args.override_existing && env::var_os(key).is_some() {
            continue;
        }
        command.env(key, value);
    }

    exec(command, program)
}

fn print(args: PrintArgs) -> Result<()> {
    let vars = envseed::parse(&args.file)?;

    let mut pairs: Vec<_> = vars.into_iter().collect();
    pairs.sort();
    for (key, value) in pairs {
        println!("{key}={value}");
    }
    Ok(())
}

#[cfg(unix)]
fn exec(mut command: Command, program: &OsString) -> Result<()> {
    let err = command.exec();
    Err(err).with_context(|| format!("failed to execute `{}`", program.to_string_lossy()))
}

#[cfg(not(unix))]
fn exec(mut command: Command, program: &OsString) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("failed to execute `{}`", program.to_string_lossy()))?;
    std::process::exit(status.code().unwrap_or(1));
}
