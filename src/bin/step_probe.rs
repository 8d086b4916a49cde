use std::env;
use std::time::Instant;

use kmp_steps::{compute_prefix_function, drive, find_all, KmpMatcher, PrefixFunctionBuilder};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("step_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(72));
    eprintln!("KMP Step Probe: step-count scaling and correctness");
    eprintln!("{}", "=".repeat(72));
    eprintln!();
    eprintln!("Drives both stepwise machines across input sizes to verify:");
    eprintln!(
        "  - Correctness: stepwise results match the one-shot forms, and scans"
    );
    eprintln!(
        "    match a brute-force search (up to --verify-limit {})",
        options.verify_limit
    );
    eprintln!("  - Linearity: total step counts stay within a small multiple of n");
    eprintln!();
    eprintln!("Columns: wall_s (seconds), steps, steps_per_n, rss_delta_kib");
    eprintln!("{}", "=".repeat(72));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/2] Prefix-function construction...");
    measurements.extend(run_builder_probe(&options, &mut sys));
    eprintln!();

    eprintln!("[2/2] KMP scan...");
    measurements.extend(run_matcher_probe(&options, &mut sys));
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("step_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 4096usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = value
                    .parse::<usize>()
                    .map_err(|_| "verify limit must be a positive integer".to_string())?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = value
                    .parse::<usize>()
                    .map_err(|_| "verify limit must be a positive integer".to_string())?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin step_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Maximum input length to verify against brute force (default: 4096)
  -h, --help                    Print this help message

Examples:
  cargo run --bin step_probe
  cargo run --bin step_probe -- --format table --verify-limit 1024
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    wall_s: f64,
    steps: usize,
    steps_per_n: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "ok",
            VerificationStatus::Failed => "FAIL",
            VerificationStatus::NotChecked => "--",
        }
    }
}

fn run_builder_probe(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[256, 1024, 4096, 16384, 65536, 262144];
    let total = SIZES.len();
    SIZES
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("      [{}/{}] pattern length {}... ", idx + 1, total, len);
            let pattern = periodic_input(len, 5);
            let m = measure("prefix_function", format!("n={len}"), len, sys, || {
                let mut builder = PrefixFunctionBuilder::new(&pattern);
                let steps = drive(&mut builder).expect("builder never suspends");
                let verification = if len <= options.verify_limit {
                    let expected = compute_prefix_function(&pattern);
                    if builder.pi() == expected.as_slice() {
                        (VerificationStatus::Passed, None)
                    } else {
                        (
                            VerificationStatus::Failed,
                            Some("stepwise pi differs from one-shot".to_string()),
                        )
                    }
                } else {
                    (VerificationStatus::NotChecked, None)
                };
                (steps, verification)
            });
            eprintln!(
                "{} steps={}, steps/n={:.2}, time={:.3}s",
                m.verification_status.icon(),
                m.steps,
                m.steps_per_n,
                m.wall_s
            );
            m
        })
        .collect()
}

fn run_matcher_probe(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const SIZES: &[usize] = &[256, 1024, 4096, 16384, 65536, 262144];
    const PATTERN: &str = "ABABAB";
    let pi = compute_prefix_function(PATTERN);
    let total = SIZES.len();
    SIZES
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("      [{}/{}] text length {}... ", idx + 1, total, len);
            let text = periodic_input(len, 3);
            let m = measure("kmp_scan", format!("m={len}"), len, sys, || {
                let mut matcher =
                    KmpMatcher::new(&text, PATTERN, &pi).expect("pi length matches pattern");
                let steps = drive(&mut matcher).expect("drive resumes through matches");
                let verification = if len <= options.verify_limit {
                    let one_shot = find_all(&text, PATTERN, &pi).expect("pi validated above");
                    let brute = brute_force(&text, PATTERN);
                    if one_shot == brute {
                        (VerificationStatus::Passed, None)
                    } else {
                        (
                            VerificationStatus::Failed,
                            Some(format!(
                                "find_all found {} matches, brute force {}",
                                one_shot.len(),
                                brute.len()
                            )),
                        )
                    }
                } else {
                    (VerificationStatus::NotChecked, None)
                };
                (steps, verification)
            });
            eprintln!(
                "{} steps={}, steps/n={:.2}, time={:.3}s",
                m.verification_status.icon(),
                m.steps,
                m.steps_per_n,
                m.wall_s
            );
            m
        })
        .collect()
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }

    eprintln!("{}", "=".repeat(72));
    eprintln!(
        "Summary: {} passed, {} failed, {} not checked (size > {})",
        passed, failed, not_checked, options.verify_limit
    );
    if failed > 0 {
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!(
                    "  FAIL {} ({}): {}",
                    m.scenario,
                    m.size_desc,
                    m.verification_detail.as_deref().unwrap_or("")
                );
            }
        }
    }
    let worst = measurements
        .iter()
        .map(|m| m.steps_per_n)
        .fold(0.0f64, f64::max);
    eprintln!(
        "Worst steps/n ratio: {:.2} (amortized linearity holds while this stays bounded)",
        worst
    );
    eprintln!("{}", "=".repeat(72));
    eprintln!();
}

fn measure<F>(
    scenario: &'static str,
    size_desc: String,
    n: usize,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> (usize, (VerificationStatus, Option<String>)),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (steps, (status, detail)) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        wall_s: duration.as_secs_f64(),
        steps,
        steps_per_n: steps as f64 / n.max(1) as f64,
        rss_delta_kib: after.saturating_sub(before),
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,wall_s,steps,steps_per_n,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{:.3},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.steps,
            m.steps_per_n,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let mut col1 = "scenario".len();
    let mut col2 = "size".len();
    for m in measurements {
        col1 = col1.max(m.scenario.len());
        col2 = col2.max(m.size_desc.len());
    }

    println!(
        "{:<col1$}  {:<col2$}  {:>10}  {:>12}  {:>11}  {:>14}  {:>12}",
        "scenario",
        "size",
        "wall_s",
        "steps",
        "steps_per_n",
        "rss_delta_kib",
        "status",
        col1 = col1,
        col2 = col2
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>10.3}  {:>12}  {:>11.3}  {:>14}  {:>12}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.steps,
            m.steps_per_n,
            m.rss_delta_kib,
            m.verification_status.label(),
            col1 = col1,
            col2 = col2
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"wall_s\":{:.3},\"steps\":{},\"steps_per_n\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.steps,
            m.steps_per_n,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}

/// Periodic input with a short repeating core, so π grows and falls and the
/// scan exercises real fallbacks.
fn periodic_input(len: usize, period: usize) -> String {
    const ALPHABET: &[char] = &['A', 'B', 'A', 'C', 'A'];
    (0..len)
        .map(|i| ALPHABET[(i % period) % ALPHABET.len()])
        .collect()
}

fn brute_force(text: &str, pattern: &str) -> Vec<usize> {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    if p.is_empty() || p.len() > t.len() {
        return Vec::new();
    }
    (0..=t.len() - p.len())
        .filter(|&start| t[start..start + p.len()] == p[..])
        .collect()
}
