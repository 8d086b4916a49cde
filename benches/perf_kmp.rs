use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use kmp_steps::{compute_prefix_function, drive, find_all, KmpMatcher, PrefixFunctionBuilder};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn random_text(rng: &mut StdRng, len: usize) -> String {
    const ALPHABET: &[char] = &['A', 'B'];
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn rss_kib() -> u64 {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(p) = sys.process(get_current_pid().unwrap()) {
        p.memory() // KiB on supported platforms
    } else {
        0
    }
}

fn bench_prefix_function(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_function");
    for &len in &[1_000usize, 10_000, 100_000] {
        group.bench_function(format!("one_shot_len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    random_text(&mut rng, len)
                },
                |pattern| {
                    criterion::black_box(compute_prefix_function(&pattern));
                },
                BatchSize::PerIteration,
            )
        });
        group.bench_function(format!("stepped_len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    random_text(&mut rng, len)
                },
                |pattern| {
                    let before = rss_kib();
                    let mut builder = PrefixFunctionBuilder::new(&pattern);
                    let steps = drive(&mut builder).unwrap();
                    criterion::black_box(steps);
                    let after = rss_kib();
                    // history growth dominates memory; keep it out of
                    // criterion's timing noise
                    eprintln!(
                        "RSS KiB delta (stepped pi {len}): {}",
                        after.saturating_sub(before)
                    );
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmp_scan");
    for &len in &[1_000usize, 10_000, 100_000] {
        group.bench_function(format!("find_all_len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(7);
                    let text = random_text(&mut rng, len);
                    let pattern = random_text(&mut rng, 8);
                    let pi = compute_prefix_function(&pattern);
                    (text, pattern, pi)
                },
                |(text, pattern, pi)| {
                    criterion::black_box(find_all(&text, &pattern, &pi).unwrap());
                },
                BatchSize::PerIteration,
            )
        });
        group.bench_function(format!("stepped_scan_len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(7);
                    let text = random_text(&mut rng, len);
                    let pattern = random_text(&mut rng, 8);
                    let pi = compute_prefix_function(&pattern);
                    (text, pattern, pi)
                },
                |(text, pattern, pi)| {
                    let mut matcher = KmpMatcher::new(&text, &pattern, &pi).unwrap();
                    criterion::black_box(matcher.run());
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prefix_function, bench_scan);
criterion_main!(benches);
