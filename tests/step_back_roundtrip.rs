use kmp_steps::{compute_prefix_function, KmpMatcher, MatchEvent, Phase, PrefixFunctionBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Observable builder state, captured through the public API.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuilderView {
    i: usize,
    j: usize,
    phase: Phase,
    pi: Vec<usize>,
    history_len: usize,
}

fn view_builder(b: &PrefixFunctionBuilder) -> BuilderView {
    BuilderView {
        i: b.current_index(),
        j: b.candidate_len(),
        phase: b.phase(),
        pi: b.pi().to_vec(),
        history_len: b.history_len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MatcherView {
    t: usize,
    j: usize,
    pending: Option<MatchEvent>,
    history_len: usize,
}

fn view_matcher(m: &KmpMatcher) -> MatcherView {
    MatcherView {
        t: m.text_index(),
        j: m.match_len(),
        pending: m.pending_match(),
        history_len: m.history_len(),
    }
}

fn random_string(rng: &mut StdRng, alphabet: &[char], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

#[test]
fn builder_step_back_restores_every_state() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let len = rng.gen_range(2..20);
        let pattern = random_string(&mut rng, &['A', 'B'], len);
        let mut builder = PrefixFunctionBuilder::new(&pattern);

        let mut trail = vec![view_builder(&builder)];
        while !builder.is_done() {
            builder.step().unwrap();
            trail.push(view_builder(&builder));
        }
        // Unwind the full run; every intermediate state must come back
        // verbatim, history length included.
        for expected in trail.iter().rev().skip(1) {
            builder.step_back().unwrap();
            assert_eq!(&view_builder(&builder), expected);
        }
        assert!(builder.step_back().is_err());
    }
}

#[test]
fn builder_random_walk_matches_shadow_stack() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..30 {
        let len = rng.gen_range(2..16);
        let pattern = random_string(&mut rng, &['A', 'B', 'C'], len);
        let mut builder = PrefixFunctionBuilder::new(&pattern);
        let mut shadow = vec![view_builder(&builder)];

        for _ in 0..200 {
            if rng.gen_bool(0.6) {
                if !builder.is_done() {
                    builder.step().unwrap();
                    shadow.push(view_builder(&builder));
                }
            } else if shadow.len() > 1 {
                builder.step_back().unwrap();
                shadow.pop();
                assert_eq!(&view_builder(&builder), shadow.last().unwrap());
            } else {
                assert!(builder.step_back().is_err());
            }
        }
        // Wherever the walk ended, running forward still yields the right π.
        assert_eq!(builder.run_to_end(), compute_prefix_function(&pattern));
    }
}

#[test]
fn matcher_step_back_restores_every_state_across_matches() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..50 {
        let text_len = rng.gen_range(0..24);
        let text = random_string(&mut rng, &['A', 'B'], text_len);
        let pattern_len = rng.gen_range(1..4);
        let pattern = random_string(&mut rng, &['A', 'B'], pattern_len);
        let pi = compute_prefix_function(&pattern);
        let mut matcher = KmpMatcher::new(&text, &pattern, &pi).unwrap();

        let mut trail = vec![view_matcher(&matcher)];
        loop {
            if matcher.pending_match().is_some() {
                matcher.acknowledge_match();
            } else if matcher.is_done() {
                break;
            } else {
                matcher.step().unwrap();
            }
            trail.push(view_matcher(&matcher));
        }
        for expected in trail.iter().rev().skip(1) {
            matcher.step_back().unwrap();
            assert_eq!(&view_matcher(&matcher), expected);
        }
        assert!(matcher.step_back().is_err());
    }
}

#[test]
fn single_step_round_trip_is_identity() {
    let pattern = "ABACABAB";
    let mut builder = PrefixFunctionBuilder::new(pattern);
    // state0 -> step() -> step_back() == state0, at every depth.
    loop {
        let before = view_builder(&builder);
        if builder.is_done() {
            break;
        }
        builder.step().unwrap();
        builder.step_back().unwrap();
        assert_eq!(view_builder(&builder), before);
        builder.step().unwrap();
    }
}
