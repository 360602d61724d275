//! Companion tool for the get_sign exercise.
//!
//! ```shell
//! ktest-tool record --value -5 -o fault.ktest
//! ktest-tool show fault.ktest
//! ktest-tool replay klee-last/*.ktest
//! ```
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;

use args::{Args, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Show { files } => {
            for (idx, file) in files.iter().enumerate() {
                if idx > 0 {
                    println!();
                }
                print!("{}", commands::show(file)?);
            }
        }
        Command::Record {
            name,
            value,
            output,
        } => commands::record(&name, value, &output)?,
        Command::Replay { files } => {
            for file in &files {
                let (a, outcome) = commands::replay(file)?;
                println!("{}", commands::report(&file.display().to_string(), a, outcome));
            }
        }
        Command::Classify { x } => {
            println!("{}", commands::report("classify", x, get_sign::run(x)));
        }
    }
    Ok(())
}
