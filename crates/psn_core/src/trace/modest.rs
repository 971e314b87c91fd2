//! Parser for `modest simulate` property results.
//!
//! The simulation model declares one property per sampled clock cycle,
//! named with the cycle as a numeric suffix (`P_150`). Results look like:
//!
//! ```text
//! + Property P_150
//!   Estimated probability: 0.4375
//!   Runs: 1600
//! ```

use super::{ProbabilityParser, TraceParseError, TraceParseResult};
use crate::models::Sample;

/// Parser for Modest simulation traces.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModestTraceParser;

impl ModestTraceParser {
    pub fn new() -> Self {
        Self
    }
}

/// Pending property header awaiting its probability line.
struct Pending<'a> {
    name: &'a str,
    clock_cycle: u64,
}

impl ProbabilityParser for ModestTraceParser {
    fn parse(&self, trace: &str) -> TraceParseResult<Vec<Sample>> {
        let mut samples = Vec::new();
        let mut pending: Option<Pending<'_>> = None;

        for (index, raw) in trace.lines().enumerate() {
            let line = raw.trim();

            if let Some(name) = property_name(line) {
                if let Some(open) = pending.take() {
                    return Err(TraceParseError::MissingProbability {
                        property: open.name.to_string(),
                    });
                }
                // Properties without a cycle suffix are not per-cycle results.
                pending = cycle_suffix(name).map(|clock_cycle| Pending { name, clock_cycle });
                continue;
            }

            let Some(value) = probability_value(line) else {
                continue;
            };
            let Some(open) = pending.take() else {
                continue;
            };

            let probability: f64 =
                value
                    .parse()
                    .map_err(|_| TraceParseError::InvalidProbability {
                        line: index + 1,
                        value: value.to_string(),
                    })?;

            if !(0.0..=1.0).contains(&probability) {
                return Err(TraceParseError::OutOfRange {
                    clock_cycle: open.clock_cycle,
                    value: probability,
                });
            }

            samples.push(Sample::new(open.clock_cycle, probability));
        }

        if let Some(open) = pending {
            return Err(TraceParseError::MissingProbability {
                property: open.name.to_string(),
            });
        }

        if samples.is_empty() {
            return Err(TraceParseError::NoSamples);
        }

        samples.sort_by_key(|s| s.clock_cycle);
        Ok(samples)
    }
}

/// Name from a `Property <name>` header, with an optional leading `+`.
fn property_name(line: &str) -> Option<&str> {
    let line = line.strip_prefix('+').unwrap_or(line).trim_start();
    let name = line.strip_prefix("Property ")?.trim();
    let name = name.trim_matches('"');
    (!name.is_empty()).then_some(name)
}

/// Trailing digits of a property name.
fn cycle_suffix(name: &str) -> Option<u64> {
    let digits_start = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    name[digits_start..].parse().ok()
}

/// Value token of a `Probability:` or `Estimated probability:` line.
fn probability_value(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix("Estimated probability:")
        .or_else(|| line.strip_prefix("Probability:"))?;
    rest.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_estimated_probabilities() {
        let trace = "\
Simulating...
+ Property P_1
  Estimated probability: 0.25
  Runs: 1600
+ Property P_0
  Estimated probability: 0
  Runs: 1600";

        let samples = ModestTraceParser::new().parse(trace).unwrap();
        assert_eq!(samples, vec![Sample::new(0, 0.0), Sample::new(1, 0.25)]);
    }

    #[test]
    fn accepts_plain_probability_lines() {
        let trace = "Property noise_at_42\n  Probability: 1 (exact)\n";
        let samples = ModestTraceParser::new().parse(trace).unwrap();
        assert_eq!(samples, vec![Sample::new(42, 1.0)]);
    }

    #[test]
    fn ignores_properties_without_cycle_suffix() {
        let trace = "\
+ Property Deadlock
  Probability: 0
+ Property P_7
  Estimated probability: 0.5";

        let samples = ModestTraceParser::new().parse(trace).unwrap();
        assert_eq!(samples, vec![Sample::new(7, 0.5)]);
    }

    #[test]
    fn empty_trace_is_no_samples() {
        assert_eq!(
            ModestTraceParser::new().parse("Simulation finished."),
            Err(TraceParseError::NoSamples)
        );
    }

    #[test]
    fn malformed_value_is_reported_with_line() {
        let trace = "+ Property P_3\n  Estimated probability: n/a\n";
        assert_eq!(
            ModestTraceParser::new().parse(trace),
            Err(TraceParseError::InvalidProbability {
                line: 2,
                value: "n/a".to_string()
            })
        );
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let trace = "+ Property P_3\n  Estimated probability: 1.5\n";
        assert!(matches!(
            ModestTraceParser::new().parse(trace),
            Err(TraceParseError::OutOfRange { clock_cycle: 3, .. })
        ));
    }

    #[test]
    fn header_without_result_is_missing_probability() {
        let trace = "+ Property P_3\n+ Property P_4\n  Estimated probability: 0.1\n";
        assert_eq!(
            ModestTraceParser::new().parse(trace),
            Err(TraceParseError::MissingProbability {
                property: "P_3".to_string()
            })
        );
    }

    #[test]
    fn cycle_suffix_reads_trailing_digits() {
        assert_eq!(cycle_suffix("P_150"), Some(150));
        assert_eq!(cycle_suffix("noise7"), Some(7));
        assert_eq!(cycle_suffix("Deadlock"), None);
    }
}
