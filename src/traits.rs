//! The shared stepping contract.
//!
//! Both machines in this crate — π construction and the KMP scan — advance by
//! discrete, reversible transitions. [`Stepwise`] captures that contract so a
//! driver (an auto-play loop, a scaling probe, a test harness) can operate on
//! either machine generically.
//!
//! A machine may *suspend* between steps: the matcher does so after reporting
//! a match, refusing further steps until the driver resumes it. Drivers that
//! do not care about observing suspensions can call [`drive`] to run a
//! machine to completion.

use crate::error::Result;

/// A state machine that advances one primitive transition at a time and can
/// replay its history backward.
pub trait Stepwise {
    /// What a single forward step reports back to the driver.
    type Outcome;

    /// Advance exactly one transition, recording the pre-step state so it can
    /// be undone.
    fn step(&mut self) -> Result<Self::Outcome>;

    /// Restore the state prior to the most recent forward step.
    fn step_back(&mut self) -> Result<()>;

    /// True once the machine has reached its terminal state.
    fn is_done(&self) -> bool;

    /// True while the machine refuses forward steps until [`resume`] is
    /// called. Defaults to never suspending.
    ///
    /// [`resume`]: Stepwise::resume
    fn is_suspended(&self) -> bool {
        false
    }

    /// Acknowledge whatever caused the suspension and allow stepping to
    /// continue. No-op for machines that never suspend.
    fn resume(&mut self) -> Result<()> {
        Ok(())
    }

    /// Number of forward steps currently recorded in the history.
    fn history_len(&self) -> usize;
}

/// Run a machine to completion, resuming through any suspensions, and return
/// the total number of forward steps taken.
///
/// The step count is the quantity the amortized-linearity argument bounds:
/// for a pattern of length n the builder takes at most 5(n-1) steps, and for
/// a text of length m the matcher takes O(m) steps.
pub fn drive<S: Stepwise>(machine: &mut S) -> Result<usize> {
    let mut steps = 0usize;
    while !machine.is_done() {
        if machine.is_suspended() {
            machine.resume()?;
            steps += 1;
            continue;
        }
        machine.step()?;
        steps += 1;
    }
    Ok(steps)
}
