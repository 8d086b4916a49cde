//! Demo: step the KMP scan across a text, pausing on each match until it is
//! acknowledged, and narrating fallbacks with the pi-chain.
//!
//! Run with:
//! `cargo run --example search`

use kmp_steps::utils::{border_chain, shift_for};
use kmp_steps::{compute_prefix_function, KmpMatcher, ScanStep};

fn main() {
    let text = "ABABABACABAABABA";
    let pattern = "ABABA";
    let pi = compute_prefix_function(pattern);

    println!("text:    {text}");
    println!("pattern: {pattern}");
    println!("pi:      {pi:?}");
    println!();

    let mut matcher = KmpMatcher::new(text, pattern, &pi).expect("pi matches pattern length");
    let mut matches = Vec::new();

    while !matcher.is_done() {
        match matcher.step().expect("no match is pending here") {
            ScanStep::Matched { t, j } => {
                println!("t={t:>2} j={j}  partial match grows");
            }
            ScanStep::Fallback { from, to } => {
                println!(
                    "t={:>2} j={to}  fallback {from} -> {to}, alignment shifts by {} (candidates {:?})",
                    matcher.text_index(),
                    shift_for(&pi, from),
                    border_chain(&pi, from),
                );
            }
            ScanStep::Shifted { t } => {
                println!("t={t:>2} j=0  no border to keep, advance");
            }
            ScanStep::Found(event) => {
                println!("t={:>2}      MATCH at {}", matcher.text_index(), event.start);
                // The scan is suspended until the match is acknowledged.
                let event = matcher.acknowledge_match().expect("a match is pending");
                matches.push(event.start);
            }
            ScanStep::Done => break,
        }
    }

    println!();
    println!("matches at {matches:?}");
    assert_eq!(matches, find_all_check(text, pattern, &pi));
}

fn find_all_check(text: &str, pattern: &str, pi: &[usize]) -> Vec<usize> {
    kmp_steps::find_all(text, pattern, pi).expect("pi matches pattern length")
}
