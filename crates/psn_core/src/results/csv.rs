//! Timeline CSV encoding.
//!
//! Rows are terminated with `\r\n`, matching the files produced by earlier
//! result runs. The reader accepts either line ending.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::sink::{SinkError, SinkResult};
use crate::models::{Sample, Timeline};

/// Header row of every timeline CSV.
pub const CSV_HEADER: &str = "Clock Cycle,Probability";

const LINE_END: &str = "\r\n";

/// Write a timeline as CSV.
pub fn write_timeline_csv<W: Write>(writer: &mut W, timeline: &Timeline) -> io::Result<()> {
    write!(writer, "{}{}", CSV_HEADER, LINE_END)?;
    for sample in timeline.samples() {
        write!(
            writer,
            "{},{}{}",
            sample.clock_cycle, sample.probability, LINE_END
        )?;
    }
    Ok(())
}

/// Read a timeline CSV from disk.
pub fn read_timeline_csv(path: &Path) -> SinkResult<Timeline> {
    let content = fs::read_to_string(path).map_err(|e| SinkError::io(path, e))?;
    parse_timeline_csv(&content)
}

/// Parse timeline CSV text.
pub fn parse_timeline_csv(content: &str) -> SinkResult<Timeline> {
    let mut lines = content.lines().enumerate();

    match lines.next() {
        Some((_, header)) if header.trim() == CSV_HEADER => {}
        Some((_, header)) => {
            return Err(SinkError::malformed(1, format!("unexpected header '{}'", header.trim())))
        }
        None => return Err(SinkError::malformed(1, "empty file")),
    }

    let mut samples = Vec::new();
    for (index, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = index + 1;

        let (cycle, probability) = line
            .split_once(',')
            .ok_or_else(|| SinkError::malformed(line_no, "expected two columns"))?;

        let clock_cycle = cycle.trim().parse::<u64>().map_err(|e| {
            SinkError::malformed(line_no, format!("bad clock cycle '{}': {}", cycle.trim(), e))
        })?;
        let probability = probability.trim().parse::<f64>().map_err(|e| {
            SinkError::malformed(
                line_no,
                format!("bad probability '{}': {}", probability.trim(), e),
            )
        })?;

        samples.push(Sample::new(clock_cycle, probability));
    }

    Ok(Timeline::from_samples(samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(timeline: &Timeline) -> String {
        let mut buf = Vec::new();
        write_timeline_csv(&mut buf, timeline).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let timeline = Timeline::from_samples(vec![Sample::new(0, 0.0), Sample::new(1, 0.125)]);
        assert_eq!(
            encode(&timeline),
            "Clock Cycle,Probability\r\n0,0\r\n1,0.125\r\n"
        );
    }

    #[test]
    fn empty_timeline_is_header_only() {
        assert_eq!(encode(&Timeline::new()), "Clock Cycle,Probability\r\n");
    }

    #[test]
    fn reparse_yields_identical_timeline() {
        let samples = vec![
            Sample::new(0, 0.1 + 0.2),
            Sample::new(4, 1.0 / 3.0),
            Sample::new(8, 0.99999),
            Sample::new(12, 1.0),
        ];
        let timeline = Timeline::from_samples(samples);

        let parsed = parse_timeline_csv(&encode(&timeline)).unwrap();
        assert_eq!(parsed, timeline);
    }

    #[test]
    fn accepts_unix_line_endings() {
        let parsed = parse_timeline_csv("Clock Cycle,Probability\n3,0.5\n").unwrap();
        assert_eq!(parsed.samples(), &[Sample::new(3, 0.5)]);
    }

    #[test]
    fn rejects_malformed_rows() {
        let err = parse_timeline_csv("Clock Cycle,Probability\nnot-a-row\n").unwrap_err();
        assert!(matches!(err, SinkError::MalformedCsv { line: 2, .. }));

        assert!(parse_timeline_csv("Cycle,P\n").is_err());
        assert!(parse_timeline_csv("").is_err());
    }
}
