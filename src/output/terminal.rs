//! Terminal output formatting with colors.

use colored::Colorize;

use crate::report::{Report, Verdict};

/// Format the per-round progress line.
///
/// `meas: 0.02 M, max t: +3.10, max tau: 2.19e-2, (5/tau)^2: 5.20e4.`
/// or, below the sample floor,
/// `meas: 0.00 M, not enough measurements (7000 still to go).`
pub fn format_progress(report: &Report) -> String {
    let meas = format!("meas: {:7.2} M, ", report.total_samples / 1e6);
    match report.verdict {
        Verdict::InsufficientData { still_needed } => {
            format!("{}not enough measurements ({:.0} still to go).", meas, still_needed)
        }
        _ => format!(
            "{}max t: {:+7.2}, max tau: {:.2e}, (5/tau)^2: {:.2e}.",
            meas, report.max_t, report.max_tau, report.samples_to_detect
        ),
    }
}

/// Format the verdict line, colored by severity.
pub fn format_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::DefinitelyLeaking => "Definitely not constant time.".red().bold().to_string(),
        Verdict::ProbablyLeaking => "Probably not constant time.".yellow().bold().to_string(),
        Verdict::NoLeakDetected => "For the moment, maybe constant time.".green().to_string(),
        Verdict::InsufficientData { still_needed } => format!(
            "Not enough measurements ({:.0} still to go).",
            still_needed
        )
        .dimmed()
        .to_string(),
    }
}

/// Format a full report for human-readable terminal output.
pub fn format_report(report: &Report) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", format_verdict(report.verdict)));
    output.push_str(&format!(
        "  max t:        {:+.2} (test #{})\n",
        report.max_t, report.leading_test
    ));
    output.push_str(&format!("  max tau:      {:.2e}\n", report.max_tau));
    output.push_str(&format!(
        "  measurements: {:.2} M ({:.2e} more to barely detect this leak)\n",
        report.total_samples / 1e6,
        report.samples_to_detect
    ));
    output
}
