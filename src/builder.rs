//! Stepwise construction of the prefix function π.
//!
//! For a pattern `s`, `π[i]` is the length of the longest proper prefix of
//! `s[0..=i]` that is also a suffix of it (its longest *border*). The classic
//! O(n) construction is available as [`compute_prefix_function`];
//! [`PrefixFunctionBuilder`] executes the same algorithm one primitive
//! transition at a time, so a driver can display every comparison, fallback,
//! and assignment individually and replay them backward.
//!
//! The machine mirrors the loop body of the one-shot algorithm:
//!
//! ```text
//! pi[0] = 0
//! j = 0
//! for i in 1..n:
//!   while j > 0 and s[i] != s[j]:   # Comparing -> FallingBack -> Comparing
//!     j = pi[j-1]
//!   if s[i] == s[j]:                # Comparing -> ExtendingMatch
//!     j += 1
//!   pi[i] = j                       # -> Committed -> (next i | Done)
//! ```

use crate::error::{Error, Result};
use crate::history::StepHistory;

/// Phase of the π construction machine. Governs which transition the next
/// `step` executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No pattern installed yet. Left as soon as `reset` runs.
    Idle,
    /// About to compare `pattern[i]` against `pattern[j]`.
    Comparing,
    /// Mismatch with j > 0: the next step retreats j along the π-chain.
    FallingBack,
    /// Match: the next step extends the border and writes `π[i]`.
    ExtendingMatch,
    /// `π[i]` is written; the next step advances i or finishes.
    Committed,
    /// Terminal. Further steps are no-ops (or an error in strict mode).
    Done,
}

/// A π entry written by a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiEntry {
    pub index: usize,
    pub value: usize,
}

/// What a single builder step reports: the phase entered, and the π entry
/// committed by this step, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub phase: Phase,
    pub written: Option<PiEntry>,
}

/// Pre-step snapshot. π itself is not cloned: writes happen at strictly
/// increasing indices, so remembering how many entries were committed is
/// enough to roll the array back.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    i: usize,
    j: usize,
    phase: Phase,
    committed: usize,
}

/// Step-by-step prefix-function construction for a fixed pattern.
pub struct PrefixFunctionBuilder {
    pattern: Vec<char>,
    pi: Vec<usize>,
    i: usize,
    j: usize,
    phase: Phase,
    committed: usize,
    history: StepHistory<Snapshot>,
    strict: bool,
}

impl PrefixFunctionBuilder {
    /// Create a builder and install `pattern`. Any pattern is legal; an empty
    /// or single-character pattern starts in [`Phase::Done`] with π already
    /// final.
    pub fn new(pattern: &str) -> Self {
        let mut builder = Self {
            pattern: Vec::new(),
            pi: Vec::new(),
            i: 0,
            j: 0,
            phase: Phase::Idle,
            committed: 0,
            history: StepHistory::new(),
            strict: false,
        };
        builder.reset(pattern);
        builder
    }

    /// Make `step` after `Done` an error instead of a silent no-op.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Reinstall a pattern, discarding all derived state and history.
    pub fn reset(&mut self, pattern: &str) {
        self.pattern = pattern.chars().collect();
        let n = self.pattern.len();
        self.pi = vec![0; n];
        self.j = 0;
        self.history.clear();
        if n <= 1 {
            // π is empty or [0]; there is nothing to compute.
            self.i = 0;
            self.phase = Phase::Done;
            self.committed = n;
        } else {
            self.i = 1;
            self.phase = Phase::Comparing;
            self.committed = 1;
        }
    }

    /// Advance exactly one transition. The pre-step state is pushed onto the
    /// history so it can be restored by [`step_back`].
    ///
    /// [`step_back`]: PrefixFunctionBuilder::step_back
    pub fn step(&mut self) -> Result<StepResult> {
        if self.phase == Phase::Done {
            if self.strict {
                return Err(Error::StepAfterTerminal);
            }
            return Ok(StepResult {
                phase: Phase::Done,
                written: None,
            });
        }
        self.history.push(self.snapshot());

        let written = match self.phase {
            Phase::Idle => {
                self.phase = if self.pattern.len() <= 1 {
                    Phase::Done
                } else {
                    Phase::Comparing
                };
                None
            }
            Phase::Comparing => {
                if self.pattern[self.i] == self.pattern[self.j] {
                    self.phase = Phase::ExtendingMatch;
                    None
                } else if self.j > 0 {
                    self.phase = Phase::FallingBack;
                    None
                } else {
                    // No border can absorb the mismatch: commit zero.
                    self.pi[self.i] = 0;
                    self.committed = self.i + 1;
                    self.phase = Phase::Committed;
                    Some(PiEntry {
                        index: self.i,
                        value: 0,
                    })
                }
            }
            Phase::FallingBack => {
                self.j = self.pi[self.j - 1];
                self.phase = Phase::Comparing;
                None
            }
            Phase::ExtendingMatch => {
                self.j += 1;
                self.pi[self.i] = self.j;
                self.committed = self.i + 1;
                self.phase = Phase::Committed;
                Some(PiEntry {
                    index: self.i,
                    value: self.j,
                })
            }
            Phase::Committed => {
                if self.i + 1 < self.pattern.len() {
                    self.i += 1;
                    self.phase = Phase::Comparing;
                } else {
                    self.phase = Phase::Done;
                }
                None
            }
            Phase::Done => unreachable!("handled above"),
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            i = self.i,
            j = self.j,
            phase = ?self.phase,
            written = ?written,
            "builder step"
        );

        Ok(StepResult {
            phase: self.phase,
            written,
        })
    }

    /// Restore the state prior to the most recent forward step.
    pub fn step_back(&mut self) -> Result<StepResult> {
        let snap = self.history.pop().ok_or(Error::NoHistory)?;
        self.restore(snap);
        Ok(StepResult {
            phase: self.phase,
            written: None,
        })
    }

    /// Drive the machine until `Done` and return the finished π array.
    pub fn run_to_end(&mut self) -> &[usize] {
        while self.phase != Phase::Done {
            // Cannot fail: the machine is not terminal and strictness only
            // affects terminal steps.
            let _ = self.step();
        }
        &self.pi
    }

    /// Tentative value of `π[index]` while the machine sits in
    /// [`Phase::ExtendingMatch`] for that index: "what π[i] would become if
    /// the match is committed". Read-only projection; never mutates.
    pub fn preview_at(&self, index: usize) -> Option<usize> {
        (self.phase == Phase::ExtendingMatch && index == self.i).then(|| self.j + 1)
    }

    /// The installed pattern.
    pub fn pattern(&self) -> &[char] {
        &self.pattern
    }

    /// Current π snapshot. Entries beyond the committed prefix hold the
    /// placeholder 0.
    pub fn pi(&self) -> &[usize] {
        &self.pi
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index i currently being processed.
    pub fn current_index(&self) -> usize {
        self.i
    }

    /// Candidate border length j.
    pub fn candidate_len(&self) -> usize {
        self.j
    }

    /// Number of π entries committed so far.
    pub fn committed_len(&self) -> usize {
        self.committed
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            i: self.i,
            j: self.j,
            phase: self.phase,
            committed: self.committed,
        }
    }

    fn restore(&mut self, snap: Snapshot) {
        // Roll the π write log back: entries committed after the snapshot
        // revert to the placeholder.
        for k in snap.committed..self.committed {
            self.pi[k] = 0;
        }
        self.i = snap.i;
        self.j = snap.j;
        self.phase = snap.phase;
        self.committed = snap.committed;
    }
}

impl crate::traits::Stepwise for PrefixFunctionBuilder {
    type Outcome = StepResult;

    fn step(&mut self) -> Result<StepResult> {
        PrefixFunctionBuilder::step(self)
    }

    fn step_back(&mut self) -> Result<()> {
        PrefixFunctionBuilder::step_back(self).map(|_| ())
    }

    fn is_done(&self) -> bool {
        PrefixFunctionBuilder::is_done(self)
    }

    fn history_len(&self) -> usize {
        PrefixFunctionBuilder::history_len(self)
    }
}

/// One-shot prefix-function computation, O(n) amortized.
///
/// The amortized bound holds because `j` rises by at most one per index and
/// every π-chain retreat strictly lowers it, so the total number of retreats
/// across the whole run is at most n.
pub fn compute_prefix_function(pattern: &str) -> Vec<usize> {
    let s: Vec<char> = pattern.chars().collect();
    let n = s.len();
    let mut pi = vec![0usize; n];
    let mut j = 0usize;
    for i in 1..n {
        while j > 0 && s[i] != s[j] {
            j = pi[j - 1];
        }
        if s[i] == s[j] {
            j += 1;
        }
        pi[i] = j;
    }
    pi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_known_vectors() {
        assert_eq!(compute_prefix_function(""), Vec::<usize>::new());
        assert_eq!(compute_prefix_function("A"), vec![0]);
        assert_eq!(compute_prefix_function("AAB"), vec![0, 1, 0]);
        assert_eq!(
            compute_prefix_function("ABACABAB"),
            vec![0, 0, 1, 0, 1, 2, 3, 2]
        );
    }

    #[test]
    fn degenerate_patterns_start_done() {
        let b = PrefixFunctionBuilder::new("");
        assert!(b.is_done());
        assert!(b.pi().is_empty());

        let b = PrefixFunctionBuilder::new("X");
        assert!(b.is_done());
        assert_eq!(b.pi(), &[0]);
    }

    #[test]
    fn stepwise_walkthrough_aab() {
        let mut b = PrefixFunctionBuilder::new("AAB");
        // A == A
        assert_eq!(b.step().unwrap().phase, Phase::ExtendingMatch);
        assert_eq!(b.preview_at(1), Some(1));
        let r = b.step().unwrap();
        assert_eq!(r.phase, Phase::Committed);
        assert_eq!(r.written, Some(PiEntry { index: 1, value: 1 }));
        // advance i to 2
        assert_eq!(b.step().unwrap().phase, Phase::Comparing);
        // B vs A with j = 1: fall back once, then commit zero
        assert_eq!(b.step().unwrap().phase, Phase::FallingBack);
        assert_eq!(b.step().unwrap().phase, Phase::Comparing);
        let r = b.step().unwrap();
        assert_eq!(r.written, Some(PiEntry { index: 2, value: 0 }));
        assert_eq!(b.step().unwrap().phase, Phase::Done);
        assert_eq!(b.pi(), &[0, 1, 0]);
        assert_eq!(b.history_len(), 7);
    }

    #[test]
    fn lenient_step_after_done_is_noop() {
        let mut b = PrefixFunctionBuilder::new("A");
        let before = b.history_len();
        let r = b.step().unwrap();
        assert_eq!(r.phase, Phase::Done);
        assert_eq!(r.written, None);
        assert_eq!(b.history_len(), before);
    }

    #[test]
    fn strict_step_after_done_errors() {
        let mut b = PrefixFunctionBuilder::new("A").with_strict(true);
        assert_eq!(b.step(), Err(Error::StepAfterTerminal));
    }

    #[test]
    fn step_back_on_fresh_builder_errors() {
        let mut b = PrefixFunctionBuilder::new("ABC");
        assert!(matches!(b.step_back(), Err(Error::NoHistory)));
    }

    #[test]
    fn step_back_restores_pi_writes() {
        let mut b = PrefixFunctionBuilder::new("AA");
        b.step().unwrap(); // Comparing -> ExtendingMatch
        b.step().unwrap(); // writes pi[1] = 1
        assert_eq!(b.pi(), &[0, 1]);
        b.step_back().unwrap();
        assert_eq!(b.pi(), &[0, 0]);
        assert_eq!(b.phase(), Phase::ExtendingMatch);
    }

    #[test]
    fn preview_only_during_extending_match() {
        let mut b = PrefixFunctionBuilder::new("AA");
        assert_eq!(b.preview_at(1), None);
        b.step().unwrap();
        assert_eq!(b.phase(), Phase::ExtendingMatch);
        assert_eq!(b.preview_at(1), Some(1));
        assert_eq!(b.preview_at(0), None);
    }
}
