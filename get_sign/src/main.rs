//! Entry point analysed by the exploration tool and used for replay.
//!
//! Takes no arguments. The single input `a` is declared through
//! [`symbolic::InputSource`], so the same binary serves both steps:
//!
//! ```shell
//! # replay a recorded test case
//! KTEST_FILE=klee-last/test000001.ktest ./target/debug/get_sign
//! echo $?
//!
//! # inspect it
//! cargo run -p ktest-tool -- show klee-last/test000001.ktest
//! ```
//!
//! The exit code is the sign of `a` (255 for -1). For `a = -5` the process
//! aborts.
use std::process::ExitCode;

use anyhow::Context;
use get_sign::{run, Outcome};
use symbolic::{InputSource, Symbolic};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Exit code for a failed setup, distinct from every sign.
const SETUP_FAILURE: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match classify_input() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(SETUP_FAILURE)
        }
    }
}

fn classify_input() -> anyhow::Result<u8> {
    let mut source = InputSource::from_env().context("Unable to load the replay test case")?;
    let a = i32::any(&mut source, "a").context("Unable to declare input `a`")?;
    debug!("a = {}", a);

    match run(a) {
        Outcome::Classified(sign) => Ok(sign.exit_code()),
        Outcome::Fault(fault) => {
            error!("{}, aborting", fault);
            std::process::abort()
        }
    }
}
