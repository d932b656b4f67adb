//! Hamming SEC / SEC-DED demonstration tool
//!
//! Encodes information bits, pushes them through a channel that flips zero, one or two
//! positions, and reports the syndrome, verdict and whether the data came back intact.
//! Without `--info`/`--errors` it runs a batch of random trials.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use hamming_secded::{
    BitVector, CodecConfig, ErrorPattern, HammingCodec, Mode, Strategy, TrialReport,
    TrialSummary, Verdict,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = cli().get_matches();

    let k = *matches.get_one::<usize>("k").context("missing k")?;
    let (strategy, mode) = selection(&matches);

    let codec = HammingCodec::new(CodecConfig::new(k, strategy, mode))
        .context("Failed to build codec")?;
    print_header(&codec);

    let info = matches.get_one::<String>("info");
    let errors: Option<Vec<usize>> = matches
        .get_many::<usize>("errors")
        .map(|values| values.copied().collect());

    if info.is_some() || errors.is_some() {
        let info = match info {
            Some(bits) => BitVector::parse(bits).context("Invalid --info")?,
            None => BitVector::zeros(k),
        };
        let pattern = ErrorPattern::from_positions(errors.as_deref().unwrap_or(&[]))
            .context("Invalid --errors")?;
        run_single(&codec, &info, &pattern)?;
        return Ok(());
    }

    let trials = *matches.get_one::<usize>("trials").context("missing trials")?;
    let seed = matches
        .get_one::<u64>("seed")
        .copied()
        .unwrap_or_else(|| rand::random());
    println!("Seed: {}", seed);

    let reports = hamming_secded::run_trials(&codec, trials, seed)?;
    if !matches.get_flag("quiet") {
        for report in &reports {
            print_report(&codec, report);
        }
    }
    print_summary(&TrialSummary::from_reports(&reports));
    Ok(())
}

fn cli() -> Command {
    Command::new("hamming")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Hamming SEC / SEC-DED encoder, channel and decoder")
        .arg(
            Arg::new("k")
                .short('k')
                .long("info-bits")
                .help("Number of information bits per codeword")
                .value_name("K")
                .value_parser(clap::value_parser!(usize))
                .default_value("4"),
        )
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .help("Parity-check matrix construction")
                .value_parser(["canonical", "systematic"])
                .default_value("canonical"),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .help("sec: single-error correction; secded: also detect double errors")
                .value_parser(["sec", "secded"])
                .default_value("secded"),
        )
        .arg(
            Arg::new("trials")
                .short('t')
                .long("trials")
                .help("Number of random trials")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the random trials (default: random)")
                .value_name("SEED")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .help("Information bits to encode, e.g. 1011 (runs one deterministic trial)")
                .value_name("BITS"),
        )
        .arg(
            Arg::new("errors")
                .short('e')
                .long("errors")
                .help("Comma-separated 1-based positions to flip (at most two)")
                .value_name("POSITIONS")
                .value_delimiter(',')
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print the summary")
                .action(ArgAction::SetTrue),
        )
}

fn selection(matches: &ArgMatches) -> (Strategy, Mode) {
    let strategy = match matches.get_one::<String>("strategy").map(String::as_str) {
        Some("systematic") => Strategy::Systematic,
        _ => Strategy::Canonical,
    };
    let mode = match matches.get_one::<String>("mode").map(String::as_str) {
        Some("sec") => Mode::Sec,
        _ => Mode::SecDed,
    };
    (strategy, mode)
}

fn print_header(codec: &HammingCodec) {
    let g = codec.geometry();
    println!(
        "k = {}, p = {}, code length = {} ({:?}, {:?})",
        g.k,
        g.p,
        codec.codeword_len(),
        codec.config().strategy,
        codec.mode()
    );
    println!("SEC:    corrects 1 error (d_min = 3)");
    println!("SECDED: also detects 2 errors (d_min = 4)");
    println!();
    println!(
        "Parity-check matrix H ({} x {}):",
        codec.matrix().height(),
        codec.matrix().width()
    );
    print!("{}", codec.matrix());
}

fn run_single(codec: &HammingCodec, info: &BitVector, pattern: &ErrorPattern) -> Result<()> {
    let codeword = codec.encode(info)?;
    let received = pattern.apply(&codeword)?;
    let decoded = codec.decode(&received)?;
    let recovered = codec.recovered(info, &decoded);
    print_report(
        codec,
        &TrialReport {
            trial: 0,
            info: info.clone(),
            codeword,
            pattern: *pattern,
            received,
            decoded,
            recovered,
        },
    );
    Ok(())
}

fn print_report(codec: &HammingCodec, report: &TrialReport) {
    println!();
    println!("{}", "_".repeat(70));
    println!("Trial #{}", report.trial + 1);
    println!("Information bits: {}", report.info);
    println!("Codeword:         {}", report.codeword);

    let positions: Vec<String> = report
        .pattern
        .positions()
        .iter()
        .map(|p| p.to_string())
        .collect();
    let shown = if positions.is_empty() {
        "-".to_string()
    } else {
        positions.join(",")
    };
    println!(
        "Errors injected:  {} (positions: {})",
        report.pattern.multiplicity(),
        shown
    );
    println!("Received:         {}", report.received);

    let decoded = &report.decoded;
    println!(
        "Syndrome: {} -> {}",
        decoded.syndrome.to_msb_string(),
        decoded.syndrome.index
    );
    println!("Verdict: {}", decoded.verdict);

    match decoded.verdict {
        Verdict::NoError => {}
        Verdict::SingleError(_) | Verdict::OverallParityOnlyError => {
            if let Some(pos) = decoded.corrected_position() {
                println!(
                    "Data recovered correctly: {} (corrected position {})",
                    report.recovered, pos
                );
                println!("Original : {}", report.codeword.to_spaced_string());
                println!("Received : {}", report.received.to_spaced_string());
                println!("Corrected: {}", decoded.corrected.to_spaced_string());
                println!("           {}^", " ".repeat(pos.index() * 2));
                if pos.get() == codec.codeword_len() && codec.mode() == Mode::SecDed {
                    println!("           (error in the overall parity bit)");
                }
            }
        }
        Verdict::DoubleErrorDetected => {
            println!("Original: {}", report.codeword);
            println!("Received: {}", report.received);
            println!(
                "Errors:   {}",
                error_markers(report.codeword.len(), &report.pattern)
            );
        }
    }
}

/// `^` under every flipped position
fn error_markers(len: usize, pattern: &ErrorPattern) -> String {
    let mut marks = vec![' '; len];
    for pos in pattern.positions() {
        if let Some(mark) = marks.get_mut(pos.index()) {
            *mark = '^';
        }
    }
    marks.into_iter().collect::<String>().trim_end().to_string()
}

fn print_summary(summary: &TrialSummary) {
    println!();
    println!("{}", "=".repeat(70));
    println!("Trials:                  {}", summary.trials);
    println!("No error:                {}", summary.no_error);
    println!("Single error corrected:  {}", summary.single_error);
    println!("Overall parity only:     {}", summary.overall_parity_only);
    println!("Double error detected:   {}", summary.double_error);
    println!("Data recovered:          {}", summary.recovered);
}
