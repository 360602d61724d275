//! Entry point for the array exercise.
//!
//! Declares `i` and then `arr` as inputs and prints the sum of the first `i`
//! elements of `arr`.
//!
//! ```shell
//! KTEST_FILE=klee-last/test000001.ktest ./target/debug/array
//! ```
use std::process::ExitCode;

use anyhow::Context;
use get_sign::sum_first_elements;
use symbolic::{InputSource, Symbolic};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match sum_input() {
        Ok(sum) => {
            println!("{sum}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn sum_input() -> anyhow::Result<u16> {
    let mut source = InputSource::from_env().context("Unable to load the replay test case")?;
    let i = usize::any(&mut source, "i").context("Unable to declare input `i`")?;
    let arr = <[u8; 8]>::any(&mut source, "arr").context("Unable to declare input `arr`")?;
    debug!("i = {}, arr = {:?}", i, arr);

    Ok(sum_first_elements(&arr, i))
}
