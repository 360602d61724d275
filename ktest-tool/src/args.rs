use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ktest-tool", version, about = "Inspect, record and replay get_sign test cases")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the contents of test case files.
    Show {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Write a test case assigning a concrete value to one input.
    Record {
        /// Name of the input region.
        #[arg(short, long, default_value = "a")]
        name: String,

        #[arg(short, long, allow_negative_numbers = true)]
        value: i32,

        /// Where to write the test case.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run the get_sign driver on the input recorded in each file.
    Replay {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Run the get_sign driver on a concrete value.
    Classify {
        #[arg(allow_negative_numbers = true)]
        x: i32,
    },
}
