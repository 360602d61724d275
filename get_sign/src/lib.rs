//! First symbolic execution exercise: testing a small function.
//!
//! [`get_sign`] classifies an integer. [`run`] calls it after a division
//! that faults for input -5, giving an exploration tool one defect to find
//! among the paths through the classifier. [`sum_first_elements`] is the
//! follow-up exercise, with a whole buffer declared as input.
pub mod array;
pub mod driver;
pub mod sign;

pub use array::sum_first_elements;
pub use driver::{divide, run, ExitStatus, Fault, Outcome, FAULTING_INPUT};
pub use sign::{get_sign, Sign};
