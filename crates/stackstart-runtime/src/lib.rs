//! # stackstart-runtime
//!
//! [`StackStarter`] walks the configured stack sequence in order: for each
//! stack it stops a running instance, starts it, and waits for it to report
//! running before moving on. The first failure ends the run; stacks already
//! started are left as they are.

pub mod outcome;
pub mod starter;

#[cfg(test)]
mod testutil;

pub use outcome::{FailureReason, RunOutcome, StackReadiness};
pub use starter::StackStarter;
