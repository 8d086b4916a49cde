//! Derived quantities drivers commonly display.
//!
//! These are read-only projections over a finished or in-progress π array;
//! nothing here mutates machine state.

/// The π-chain starting at border length `j`: candidate border lengths in
/// decreasing order, obtained by repeatedly applying `π[x-1]`, always ending
/// in 0.
///
/// This is exactly the sequence of `j` values a mismatch at border length `j`
/// would try, longest first.
///
/// ```
/// use kmp_steps::{compute_prefix_function, utils::border_chain};
///
/// let pi = compute_prefix_function("ABABA");
/// assert_eq!(border_chain(&pi, 3), vec![3, 1, 0]);
/// assert_eq!(border_chain(&pi, 0), vec![0]);
/// ```
pub fn border_chain(pi: &[usize], j: usize) -> Vec<usize> {
    let mut chain = Vec::new();
    let mut x = j;
    while x > 0 {
        chain.push(x);
        x = pi[x - 1];
    }
    chain.push(0);
    chain
}

/// How far the pattern's alignment start moves when a fallback retreats from
/// border length `j`: `j - π[j-1]`. Zero when `j == 0` (no fallback happens).
pub fn shift_for(pi: &[usize], j: usize) -> usize {
    if j == 0 {
        0
    } else {
        j - pi[j - 1]
    }
}
