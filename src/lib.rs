//! Stepwise Knuth-Morris-Pratt (KMP)
//!
//! This crate implements KMP substring search and its prefix-function (π)
//! precomputation as *stepwise state machines*: every primitive comparison,
//! fallback, and assignment is a discrete, reversible unit of progress that a
//! caller can advance one at a time, replay backward, or run to completion.
//!
//! ## Core idea
//! 1. [`PrefixFunctionBuilder`] builds π for a pattern, one transition per
//!    `step()`, with full step-back via a snapshot history.
//! 2. [`KmpMatcher`] consumes the finished π array and scans a text under the
//!    same stepping contract, suspending on each match until the caller
//!    acknowledges it.
//! 3. The [`Stepwise`] trait lets a generic driver (an auto-play loop, a
//!    probe, a test) advance either machine without knowing which it holds.
//!
//! Both machines do O(1) amortized work per input position: on a mismatch the
//! candidate length only ever falls along the π-chain, and it can fall at
//! most as often as it has risen.
//!
//! ## Quick start
//! ```
//! use kmp_steps::{compute_prefix_function, find_all};
//!
//! let pi = compute_prefix_function("ABABA");
//! assert_eq!(pi, vec![0, 0, 1, 2, 3]);
//!
//! // Occurrences may overlap.
//! let hits = find_all("ABABABA", "ABABA", &pi).unwrap();
//! assert_eq!(hits, vec![0, 2]);
//! ```
//!
//! ## Stepping
//! ```
//! use kmp_steps::{Phase, PrefixFunctionBuilder};
//!
//! let mut builder = PrefixFunctionBuilder::new("AAB");
//! while !builder.is_done() {
//!     builder.step().unwrap();
//! }
//! assert_eq!(builder.phase(), Phase::Done);
//! assert_eq!(builder.pi(), &[0, 1, 0]);
//!
//! // Every forward step can be undone.
//! builder.step_back().unwrap();
//! assert_ne!(builder.phase(), Phase::Done);
//! ```

pub mod builder;
pub mod error;
pub mod history;
pub mod matcher;
pub mod traits;
pub mod utils;

pub use crate::builder::{
    compute_prefix_function, Phase, PiEntry, PrefixFunctionBuilder, StepResult,
};
pub use crate::error::{Error, Result};
pub use crate::matcher::{find_all, KmpMatcher, MatchEvent, ScanStep};
pub use crate::traits::{drive, Stepwise};
