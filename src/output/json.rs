//! JSON serialization for detection results.

use crate::report::Outcome;

/// Serialize an [`Outcome`] to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for Outcome).
pub fn to_json(outcome: &Outcome) -> Result<String, serde_json::Error> {
    serde_json::to_string(outcome)
}

/// Serialize an [`Outcome`] to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for Outcome).
pub fn to_json_pretty(outcome: &Outcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Report, Verdict};

    fn make_outcome() -> Outcome {
        Outcome::Leaking {
            report: Report {
                verdict: Verdict::DefinitelyLeaking,
                max_t: 612.0,
                max_tau: 4.3,
                samples_to_detect: 1.35,
                total_samples: 20_000.0,
                leading_test: 55,
            },
            attempts: 10,
        }
    }

    #[test]
    fn outcome_round_trips_through_json() {
        let json = to_json(&make_outcome()).unwrap();
        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert!(back.is_leaking());
        assert_eq!(back.report().leading_test, 55);
    }

    #[test]
    fn pretty_json_names_the_verdict() {
        let json = to_json_pretty(&make_outcome()).unwrap();
        assert!(json.contains("DefinitelyLeaking"));
        assert!(json.contains("max_t"));
    }
}
