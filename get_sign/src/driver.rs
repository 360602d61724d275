//! The caller of [`get_sign`](crate::get_sign), with a division planted in
//! front of it that faults for exactly one input.
use std::fmt::Display;

use thiserror::Error;
use tracing::{debug, trace};

use crate::sign::Sign;

const NUMERATOR: i32 = 1000;
const OFFSET: i32 = 5;

/// The input that makes the divisor zero.
pub const FAULTING_INPUT: i32 = -OFFSET;

/// Abort signal number on Unix.
const SIGABRT: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("attempt to divide by zero")]
    DivisionByZero,
}

/// How a single run of the driver ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Classified(Sign),
    Fault(Fault),
}

/// Status of the `get_sign` process as a shell sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Code(u8),
    /// Terminated by `SIGABRT`.
    Aborted,
}

impl ExitStatus {
    /// The value of `$?` in a POSIX shell.
    pub fn shell_status(self) -> u8 {
        match self {
            Self::Code(code) => code,
            Self::Aborted => 128 + SIGABRT,
        }
    }
}

impl Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exit code {code}"),
            Self::Aborted => write!(f, "aborted (SIGABRT, status {})", self.shell_status()),
        }
    }
}

impl Outcome {
    pub fn exit_status(self) -> ExitStatus {
        match self {
            Self::Classified(sign) => ExitStatus::Code(sign.exit_code()),
            Self::Fault(_) => ExitStatus::Aborted,
        }
    }

    pub fn is_fault(self) -> bool {
        matches!(self, Self::Fault(_))
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classified(sign) => write!(f, "get_sign returned {} ({sign})", sign.value()),
            Self::Fault(fault) => write!(f, "{fault} before get_sign was reached"),
        }
    }
}

/// Computes `1000 / (x + 5)`. The addition wraps.
pub fn divide(x: i32) -> Result<i32, Fault> {
    let divisor = x.wrapping_add(OFFSET);
    NUMERATOR.checked_div(divisor).ok_or(Fault::DivisionByZero)
}

/// Runs the division and then classifies `x`.
pub fn run(x: i32) -> Outcome {
    let b = match divide(x) {
        Ok(b) => b,
        Err(fault) => {
            debug!("Input {} faulted: {}", x, fault);
            return Outcome::Fault(fault);
        }
    };
    trace!("{} / ({} + {}) = {}", NUMERATOR, x, OFFSET, b);

    let sign = Sign::of(x);
    debug!("Input {} classified as {}", x, sign);
    Outcome::Classified(sign)
}
