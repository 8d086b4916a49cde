//! Demo: watch the prefix function being built one transition at a time.
//!
//! Run with:
//! `cargo run --example build_pi`

use kmp_steps::{Phase, PrefixFunctionBuilder};

fn main() {
    let pattern = "ABACABAB";
    let mut builder = PrefixFunctionBuilder::new(pattern);

    println!("pattern: {pattern}");
    println!();

    let mut step_no = 0usize;
    while !builder.is_done() {
        let i = builder.current_index();
        let j = builder.candidate_len();
        let phase = builder.phase();
        let line = match phase {
            Phase::Comparing => format!(
                "compare s[{i}]={:?} with s[{j}]={:?}",
                builder.pattern()[i],
                builder.pattern()[j]
            ),
            Phase::FallingBack => format!("mismatch: retreat j along the pi-chain from {j}"),
            Phase::ExtendingMatch => format!(
                "match: extend the border, pi[{i}] will become {}",
                builder.preview_at(i).unwrap_or(j)
            ),
            Phase::Committed => format!("pi[{i}] = {} committed, advance i", builder.pi()[i]),
            Phase::Idle | Phase::Done => String::new(),
        };

        let result = builder.step().expect("machine is not terminal");
        step_no += 1;
        println!("step {step_no:>2}: {line:<55} -> {:?}", result.phase);
    }

    println!();
    println!("pi = {:?}", builder.pi());
    println!("{} steps, all reversible via step_back()", builder.history_len());
}
