//! Stepwise KMP scan over a text.
//!
//! [`KmpMatcher`] locates all occurrences of a pattern in a text, including
//! overlapping ones, using a prefix function built beforehand (see
//! [`crate::builder`]). It exposes the same step/step-back contract as the
//! builder, plus a suspension protocol around matches: when the scan
//! completes an occurrence it reports a [`MatchEvent`] and refuses further
//! steps until the driver acknowledges it, so a match can never scroll past
//! unobserved. Acknowledging performs the overlap fallback `j ← π[m-1]` and
//! resumes the scan.
//!
//! The one-shot form is [`find_all`].

use crate::error::{Error, Result};
use crate::history::StepHistory;

/// An occurrence of the pattern, reported when the match length reaches the
/// pattern length. `start` is the 0-based char index of the first matched
/// text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchEvent {
    pub start: usize,
}

/// Outcome of a single matcher step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    /// `text[t] == pattern[j]`: both cursors advanced.
    Matched { t: usize, j: usize },
    /// Mismatch with j > 0: j retreated along the π-chain; t unchanged.
    Fallback { from: usize, to: usize },
    /// Mismatch with j == 0: the text cursor advanced past the position.
    Shifted { t: usize },
    /// A full occurrence was found. The scan is suspended until
    /// [`KmpMatcher::acknowledge_match`] is called.
    Found(MatchEvent),
    /// Terminal; nothing left to scan.
    Done,
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    t: usize,
    j: usize,
    pending: Option<MatchEvent>,
}

/// Step-by-step KMP scan of an immutable text against an immutable pattern
/// and its prefix function.
#[derive(Debug)]
pub struct KmpMatcher {
    text: Vec<char>,
    pattern: Vec<char>,
    pi: Vec<usize>,
    t: usize,
    j: usize,
    pending: Option<MatchEvent>,
    history: StepHistory<Snapshot>,
    strict: bool,
}

impl KmpMatcher {
    /// Create a matcher. Fails with [`Error::PrecomputationRequired`] when
    /// the π array's length disagrees with the pattern length.
    pub fn new(text: &str, pattern: &str, pi: &[usize]) -> Result<Self> {
        let mut matcher = Self {
            text: Vec::new(),
            pattern: Vec::new(),
            pi: Vec::new(),
            t: 0,
            j: 0,
            pending: None,
            history: StepHistory::new(),
            strict: false,
        };
        matcher.reset(text, pattern, pi)?;
        Ok(matcher)
    }

    /// Make `step` after the terminal state an error instead of a no-op.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Reinstall inputs, discarding scan position, pending match, and
    /// history. Same precondition as [`KmpMatcher::new`].
    pub fn reset(&mut self, text: &str, pattern: &str, pi: &[usize]) -> Result<()> {
        let pattern: Vec<char> = pattern.chars().collect();
        if pi.len() != pattern.len() {
            return Err(Error::PrecomputationRequired {
                expected: pattern.len(),
                got: pi.len(),
            });
        }
        self.text = text.chars().collect();
        self.pattern = pattern;
        self.pi = pi.to_vec();
        self.t = 0;
        self.j = 0;
        self.pending = None;
        self.history.clear();
        Ok(())
    }

    /// Advance exactly one transition.
    ///
    /// Errors with [`Error::MatchPending`] while a match awaits
    /// acknowledgement. At the terminal state this is a lenient no-op
    /// returning [`ScanStep::Done`] (an error in strict mode).
    pub fn step(&mut self) -> Result<ScanStep> {
        if self.pending.is_some() {
            return Err(Error::MatchPending);
        }
        if self.is_done() {
            if self.strict {
                return Err(Error::StepAfterTerminal);
            }
            return Ok(ScanStep::Done);
        }
        self.history.push(self.snapshot());

        let outcome = if self.text[self.t] == self.pattern[self.j] {
            self.t += 1;
            self.j += 1;
            if self.j == self.pattern.len() {
                let event = MatchEvent {
                    start: self.t - self.pattern.len(),
                };
                self.pending = Some(event);
                ScanStep::Found(event)
            } else {
                ScanStep::Matched {
                    t: self.t,
                    j: self.j,
                }
            }
        } else if self.j > 0 {
            let from = self.j;
            self.j = self.pi[self.j - 1];
            ScanStep::Fallback { from, to: self.j }
        } else {
            self.t += 1;
            ScanStep::Shifted { t: self.t }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(t = self.t, j = self.j, outcome = ?outcome, "matcher step");

        Ok(outcome)
    }

    /// Acknowledge the pending match, perform the overlap fallback
    /// `j ← π[m-1]`, and resume scanning. Returns the acknowledged event, or
    /// `None` when nothing was pending.
    ///
    /// This is the second observable sub-step of a match: the report
    /// ([`ScanStep::Found`]) always precedes the resume. The acknowledgement
    /// pushes its own snapshot, so `step_back` undoes it independently.
    pub fn acknowledge_match(&mut self) -> Option<MatchEvent> {
        let event = self.pending?;
        self.history.push(self.snapshot());
        self.pending = None;
        // j == m here; the fallback allows overlapping occurrences.
        self.j = self.pi[self.pattern.len() - 1];
        Some(event)
    }

    /// Restore the state prior to the most recent forward step or
    /// acknowledgement.
    pub fn step_back(&mut self) -> Result<()> {
        let snap = self.history.pop().ok_or(Error::NoHistory)?;
        self.t = snap.t;
        self.j = snap.j;
        self.pending = snap.pending;
        Ok(())
    }

    /// Run the scan to completion, acknowledging matches as they occur, and
    /// return all match start positions in ascending order.
    pub fn run(&mut self) -> Vec<usize> {
        let mut starts = Vec::new();
        loop {
            if let Some(event) = self.acknowledge_match() {
                starts.push(event.start);
                continue;
            }
            if self.is_done() {
                return starts;
            }
            // Not terminal and nothing pending, so this cannot fail.
            let _ = self.step();
        }
    }

    /// The match event awaiting acknowledgement, if any.
    pub fn pending_match(&self) -> Option<MatchEvent> {
        self.pending
    }

    /// Terminal when no match is pending and the pattern cannot fit in the
    /// remaining text suffix (which covers the empty pattern and an exhausted
    /// text).
    pub fn is_done(&self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        if self.pattern.is_empty() {
            return true;
        }
        // t - j is the alignment start: where the current candidate
        // occurrence begins in the text.
        self.t - self.j + self.pattern.len() > self.text.len()
    }

    /// Current text cursor.
    pub fn text_index(&self) -> usize {
        self.t
    }

    /// Current match length (pattern cursor).
    pub fn match_len(&self) -> usize {
        self.j
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn pattern(&self) -> &[char] {
        &self.pattern
    }

    /// The prefix function guiding the fallbacks. Read-only by construction.
    pub fn pi(&self) -> &[usize] {
        &self.pi
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            t: self.t,
            j: self.j,
            pending: self.pending,
        }
    }
}

impl crate::traits::Stepwise for KmpMatcher {
    type Outcome = ScanStep;

    fn step(&mut self) -> Result<ScanStep> {
        KmpMatcher::step(self)
    }

    fn step_back(&mut self) -> Result<()> {
        KmpMatcher::step_back(self)
    }

    fn is_done(&self) -> bool {
        KmpMatcher::is_done(self)
    }

    fn is_suspended(&self) -> bool {
        self.pending.is_some()
    }

    fn resume(&mut self) -> Result<()> {
        self.acknowledge_match();
        Ok(())
    }

    fn history_len(&self) -> usize {
        KmpMatcher::history_len(self)
    }
}

/// One-shot KMP search: all occurrences of `pattern` in `text`, as ascending
/// char-index start positions. Occurrences may overlap. Same precondition on
/// `pi` as [`KmpMatcher::new`]; an empty pattern yields no matches.
pub fn find_all(text: &str, pattern: &str, pi: &[usize]) -> Result<Vec<usize>> {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    if pi.len() != p.len() {
        return Err(Error::PrecomputationRequired {
            expected: p.len(),
            got: pi.len(),
        });
    }
    let mut starts = Vec::new();
    if p.is_empty() {
        return Ok(starts);
    }
    let mut j = 0usize;
    for (idx, &ch) in t.iter().enumerate() {
        while j > 0 && ch != p[j] {
            j = pi[j - 1];
        }
        if ch == p[j] {
            j += 1;
        }
        if j == p.len() {
            starts.push(idx + 1 - p.len());
            j = pi[j - 1];
        }
    }
    Ok(starts)
}
